//! Pinecone Index Client
//!
//! A typed facade over a remote vector index's data-plane REST operations:
//! upsert, fetch, query, update, delete and describe-index-stats.
//!
//! ## Features
//!
//! - **Flexible inputs**: vectors as structs, tuples or loose JSON, normalized
//!   into strict request records before anything is sent
//! - **Omitted defaults**: unset optional fields never reach the wire, so the
//!   server's own defaulting applies
//! - **Mode-shaped query results**: unary and multi-query responses are
//!   distinct variants
//! - **Fail-fast selectors**: conflicting delete/query selectors are rejected
//!   locally
//! - **Async or blocking**: [`Index`] for async callers, [`BlockingIndex`] with
//!   a fixed worker pool for synchronous ones
//! - **Telemetry**: `tracing` events and Prometheus metrics per call
//!
//! ## Architecture
//!
//! 1. **Config** (`config`): deployment defaults and transport overrides,
//!    merged into an owned snapshot per index.
//! 2. **Inputs** (`input`, `params`): caller-facing shapes and parameter
//!    groups, kept apart from transport options.
//! 3. **Facade** (`index`, `blocking`): normalization, selector checks and
//!    response narrowing.
//! 4. **Transport** (`api`): the [`api::VectorOperationsApi`] seam and its
//!    `reqwest` implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pinecone_index::{ClientConfig, DeleteParams, Index, TransportOptions};
//!
//! fn main() -> pinecone_index::Result<()> {
//!     let index = Index::builder("movies")
//!         .defaults(ClientConfig::from_env())
//!         .pool_threads(4)
//!         .build_blocking()?;
//!
//!     index.delete(
//!         DeleteParams::by_ids(["id1", "id2"]).namespace("my_namespace"),
//!         TransportOptions::default(),
//!     )?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod args;
pub mod blocking;
pub mod config;
pub mod error;
pub mod index;
pub mod input;
pub mod metrics;
pub mod models;
pub mod params;

pub use blocking::{BlockingIndex, PendingCall};
pub use config::{ClientConfig, OpenApiConfig};
pub use error::{IndexError, Result};
pub use index::{Index, IndexBuilder};
pub use input::{QueryVectorInput, VectorInput};
pub use models::{
    DescribeIndexStatsResponse, FetchResponse, Filter, Metadata, MultiQueryResult,
    NamespaceSummary, QueryResponse, QueryVector, ScoredVector, SingleQueryResults,
    UnaryQueryResult, UpsertResponse, Usage, Vector,
};
pub use params::{
    DeleteParams, DescribeIndexStatsParams, FetchParams, QueryParams, TransportOptions,
    UpdateParams, UpsertParams,
};

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
