//! Caller-facing parameter groups
//!
//! Each operation takes its business parameters and a separate
//! [`TransportOptions`]. The facade never reads transport options; it hands
//! them to the transport untouched.

use std::time::Duration;

use crate::input::{QueryVectorInput, VectorInput};
use crate::models::{Filter, Metadata};

/// Per-call transport settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportOptions {
    /// Overrides the configured request timeout
    pub request_timeout: Option<Duration>,

    /// Selects a server template; `None` uses the configured host or default
    /// server
    pub host_index: Option<usize>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn host_index(mut self, index: usize) -> Self {
        self.host_index = Some(index);
        self
    }
}

/// Parameters for upsert
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertParams {
    pub vectors: Vec<VectorInput>,
    pub namespace: Option<String>,
}

impl UpsertParams {
    pub fn new<I, V>(vectors: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VectorInput>,
    {
        Self {
            vectors: vectors.into_iter().map(Into::into).collect(),
            namespace: None,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Parameters for delete
///
/// Exactly one of `ids`, `delete_all = true` or `filter` selects what is
/// deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteParams {
    pub ids: Option<Vec<String>>,
    pub delete_all: Option<bool>,
    pub namespace: Option<String>,
    pub filter: Option<Filter>,
}

impl DeleteParams {
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Some(ids.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        Self {
            delete_all: Some(true),
            ..Default::default()
        }
    }

    pub fn by_filter(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            ..Default::default()
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Parameters for fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchParams {
    pub ids: Vec<String>,
    pub namespace: Option<String>,
}

impl FetchParams {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            namespace: None,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Parameters for query
///
/// Exactly one of `vector`, `id` or `queries` selects the query mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub vector: Option<Vec<f32>>,
    pub id: Option<String>,
    /// Deprecated multi-query list
    pub queries: Option<Vec<QueryVectorInput>>,
    pub top_k: Option<u32>,
    pub namespace: Option<String>,
    pub filter: Option<Filter>,
    pub include_values: Option<bool>,
    pub include_metadata: Option<bool>,
}

impl QueryParams {
    /// Query by values
    pub fn by_vector(vector: Vec<f32>) -> Self {
        Self {
            vector: Some(vector),
            ..Default::default()
        }
    }

    /// Query using a stored vector as the query
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Deprecated multi-query
    pub fn by_queries<I, Q>(queries: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<QueryVectorInput>,
    {
        Self {
            queries: Some(queries.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn include_values(mut self, include: bool) -> Self {
        self.include_values = Some(include);
        self
    }

    pub fn include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = Some(include);
        self
    }

    /// True when the call targets a single query vector
    pub fn is_unary(&self) -> bool {
        self.vector.is_some() || self.id.is_some()
    }
}

/// Parameters for update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateParams {
    pub id: String,
    pub values: Option<Vec<f32>>,
    /// Fields to add or overwrite; existing fields are never removed
    pub set_metadata: Option<Metadata>,
    pub namespace: Option<String>,
}

impl UpdateParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: None,
            set_metadata: None,
            namespace: None,
        }
    }

    pub fn values(mut self, values: Vec<f32>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn set_metadata(mut self, metadata: Metadata) -> Self {
        self.set_metadata = Some(metadata);
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Parameters for describe-index-stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeIndexStatsParams {
    /// Restricts the statistics; `None` matches everything
    pub filter: Option<Filter>,
}

impl DescribeIndexStatsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_options_builder() {
        let opts = TransportOptions::new()
            .timeout(Duration::from_secs(2))
            .host_index(1);
        assert_eq!(opts.request_timeout, Some(Duration::from_secs(2)));
        assert_eq!(opts.host_index, Some(1));
        assert_eq!(TransportOptions::default().request_timeout, None);
    }

    #[test]
    fn test_query_mode() {
        assert!(QueryParams::by_vector(vec![1.0]).is_unary());
        assert!(QueryParams::by_id("a").is_unary());
        assert!(!QueryParams::by_queries(vec![vec![1.0f32]]).is_unary());
        assert!(!QueryParams::default().is_unary());
    }

    #[test]
    fn test_delete_constructors() {
        let params = DeleteParams::by_ids(["a", "b"]).namespace("ns");
        assert_eq!(params.ids, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(params.delete_all, None);
        assert_eq!(params.namespace.as_deref(), Some("ns"));

        assert_eq!(DeleteParams::all().delete_all, Some(true));
    }

    #[test]
    fn test_upsert_params_collects_inputs() {
        let params = UpsertParams::new(vec![("a", vec![1.0f32]), ("b", vec![2.0f32])]);
        assert_eq!(params.vectors.len(), 2);
        assert!(params.namespace.is_none());
    }
}
