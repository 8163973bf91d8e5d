//! Transport layer for data-plane operations
//!
//! [`VectorOperationsApi`] is the seam between the facade and the wire. The
//! facade only builds strict request records and hands them over together
//! with the caller's [`TransportOptions`]; URL resolution, authentication,
//! encoding and status translation all live behind the trait.

pub mod rest;

pub use rest::RestVectorApi;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    DeleteRequest, DescribeIndexStatsRequest, DescribeIndexStatsResponse, FetchRequest,
    FetchResponse, QueryRequest, RawQueryResponse, UpdateRequest, UpsertRequest, UpsertResponse,
};
use crate::params::TransportOptions;

/// One method per remote operation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorOperationsApi: Send + Sync {
    /// Write vectors, overwriting existing ids
    async fn upsert(
        &self,
        request: UpsertRequest,
        options: &TransportOptions,
    ) -> Result<UpsertResponse>;

    /// Delete by ids, by filter, or the whole namespace
    async fn delete(&self, request: DeleteRequest, options: &TransportOptions) -> Result<()>;

    /// Look up vectors by id
    async fn fetch(&self, request: FetchRequest, options: &TransportOptions)
        -> Result<FetchResponse>;

    /// Similarity search; the response carries both the unary and multi shapes
    async fn query(
        &self,
        request: QueryRequest,
        options: &TransportOptions,
    ) -> Result<RawQueryResponse>;

    /// Overwrite values and/or merge metadata of one vector
    async fn update(&self, request: UpdateRequest, options: &TransportOptions) -> Result<()>;

    /// Per-namespace counts and dimension
    async fn describe_index_stats(
        &self,
        request: DescribeIndexStatsRequest,
        options: &TransportOptions,
    ) -> Result<DescribeIndexStatsResponse>;
}
