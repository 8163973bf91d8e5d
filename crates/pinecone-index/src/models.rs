//! Wire records for the data-plane REST API
//!
//! Request records skip every unset optional field during serialization.
//! Field names follow the server's camelCase convention.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vector metadata, a JSON object
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metadata filter expression, a JSON object
pub type Filter = serde_json::Map<String, serde_json::Value>;

/// A stored vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// Unique id within a namespace
    pub id: String,

    /// Dense values; dimension is checked by the server
    #[serde(default)]
    pub values: Vec<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Vector {
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// One entry of a deprecated multi-query request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVector {
    pub values: Vec<f32>,

    /// Overrides the request-level `top_k` for this query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Overrides the request-level namespace for this query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl QueryVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            top_k: None,
            namespace: None,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A query match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVector {
    pub id: String,

    #[serde(default)]
    pub score: f32,

    /// Empty unless `include_values` was requested
    #[serde(default)]
    pub values: Vec<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Matches for one query of a multi-query request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleQueryResults {
    #[serde(default)]
    pub matches: Vec<ScoredVector>,

    #[serde(default)]
    pub namespace: String,
}

/// Read units consumed by a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub read_units: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertRequest {
    pub vectors: Vec<Vector>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    #[serde(default)]
    pub upserted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_all: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

/// Fetch is a GET; the transport renders this as a query string
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub ids: Vec<String>,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub vectors: HashMap<String, Vector>,

    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<QueryVector>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_values: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_metadata: Option<bool>,
}

/// Query response as it arrives, carrying both shapes
///
/// The facade narrows this to a [`QueryResponse`] for the mode actually used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawQueryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SingleQueryResults>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<ScoredVector>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Result of a query by `vector` or `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryQueryResult {
    pub matches: Vec<ScoredVector>,
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Result of a deprecated multi-query request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiQueryResult {
    pub results: Vec<SingleQueryResults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Query response narrowed to the mode that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Unary(UnaryQueryResult),
    Multi(MultiQueryResult),
}

impl QueryResponse {
    /// Narrow a raw response; `unary` is true when `vector` or `id` was sent
    pub fn from_raw(raw: RawQueryResponse, unary: bool) -> Self {
        if unary {
            QueryResponse::Unary(UnaryQueryResult {
                matches: raw.matches.unwrap_or_default(),
                namespace: raw.namespace.unwrap_or_default(),
                usage: raw.usage,
            })
        } else {
            QueryResponse::Multi(MultiQueryResult {
                results: raw.results.unwrap_or_default(),
                usage: raw.usage,
            })
        }
    }

    pub fn as_unary(&self) -> Option<&UnaryQueryResult> {
        match self {
            QueryResponse::Unary(result) => Some(result),
            QueryResponse::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&MultiQueryResult> {
        match self {
            QueryResponse::Multi(result) => Some(result),
            QueryResponse::Unary(_) => None,
        }
    }

    pub fn into_unary(self) -> Option<UnaryQueryResult> {
        match self {
            QueryResponse::Unary(result) => Some(result),
            QueryResponse::Multi(_) => None,
        }
    }

    pub fn into_multi(self) -> Option<MultiQueryResult> {
        match self {
            QueryResponse::Multi(result) => Some(result),
            QueryResponse::Unary(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_metadata: Option<Metadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// The filter is always sent; an empty object matches everything
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DescribeIndexStatsRequest {
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    #[serde(default)]
    pub vector_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeIndexStatsResponse {
    #[serde(default)]
    pub namespaces: HashMap<String, NamespaceSummary>,

    #[serde(default)]
    pub dimension: u32,

    #[serde(default)]
    pub index_fullness: f32,

    #[serde(default)]
    pub total_vector_count: u64,
}
