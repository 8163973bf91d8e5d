//! Index client facade
//!
//! [`Index`] is the async call surface for one remote index. Each operation
//! normalizes its parameters into a strict request record, checks selector
//! exclusivity, forwards the caller's [`TransportOptions`] untouched and,
//! for query, narrows the response to the mode actually used.
//!
//! # Example
//!
//! ```rust,no_run
//! use pinecone_index::{ClientConfig, Index, QueryParams, TransportOptions, UpsertParams};
//!
//! # async fn run() -> pinecone_index::Result<()> {
//! let index = Index::builder("movies")
//!     .defaults(ClientConfig::from_env())
//!     .build()?;
//!
//! index
//!     .upsert(
//!         UpsertParams::new(vec![("id1", vec![1.0f32, 2.0, 3.0]), ("id2", vec![3.0, 2.0, 1.0])]),
//!         TransportOptions::default(),
//!     )
//!     .await?;
//!
//! let response = index
//!     .query(QueryParams::by_vector(vec![1.0, 2.0, 3.0]).top_k(5), TransportOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::api::{RestVectorApi, VectorOperationsApi};
use crate::args::present_names;
use crate::blocking::BlockingIndex;
use crate::config::{ClientConfig, OpenApiConfig};
use crate::error::{IndexError, Result};
use crate::input::{QueryVectorInput, VectorInput};
use crate::metrics::IndexMetrics;
use crate::models::{
    DeleteRequest, DescribeIndexStatsRequest, DescribeIndexStatsResponse, FetchRequest,
    FetchResponse, QueryRequest, QueryResponse, UpdateRequest, UpsertRequest, UpsertResponse,
};
use crate::params::{
    DeleteParams, DescribeIndexStatsParams, FetchParams, QueryParams, TransportOptions,
    UpdateParams, UpsertParams,
};

/// User agent sent with every request
pub fn user_agent() -> String {
    format!("pinecone-index-rust/{}", crate::VERSION)
}

/// Async facade over one remote index
///
/// Cloning is cheap; clones share the transport, configuration snapshot and
/// metrics.
#[derive(Clone)]
pub struct Index {
    name: Arc<str>,
    config: Arc<OpenApiConfig>,
    api: Arc<dyn VectorOperationsApi>,
    metrics: Arc<IndexMetrics>,
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("name", &self.name)
            .field("server_variables", &self.config.server_variables)
            .finish_non_exhaustive()
    }
}

impl Index {
    /// Start building a facade for `index_name`
    pub fn builder(index_name: impl Into<String>) -> IndexBuilder {
        IndexBuilder::new(index_name)
    }

    /// Index name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration snapshot taken at construction
    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    /// Call metrics
    pub fn metrics(&self) -> &IndexMetrics {
        &self.metrics
    }

    /// Write vectors into a namespace, overwriting existing ids
    pub async fn upsert(
        &self,
        params: UpsertParams,
        options: TransportOptions,
    ) -> Result<UpsertResponse> {
        let vectors = params
            .vectors
            .into_iter()
            .map(VectorInput::into_vector)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            index = %self.name,
            namespace = ?params.namespace,
            count = vectors.len(),
            "Upserting vectors"
        );

        let request = UpsertRequest {
            vectors,
            namespace: params.namespace,
        };
        let response = self
            .observe("upsert", self.api.upsert(request, &options))
            .await?;
        self.metrics.record_upserted(response.upserted_count);
        Ok(response)
    }

    /// Delete vectors by ids, by metadata filter, or the whole namespace
    ///
    /// Missing ids are not an error.
    pub async fn delete(&self, params: DeleteParams, options: TransportOptions) -> Result<()> {
        let selectors = present_names([
            ("ids", params.ids.as_ref().map(|_| ())),
            ("delete_all", params.delete_all.filter(|all| *all).map(|_| ())),
            ("filter", params.filter.as_ref().map(|_| ())),
        ]);
        match selectors.len() {
            0 => {
                return Err(IndexError::invalid_argument(
                    "Delete needs one of ids, delete_all=true or filter",
                ))
            }
            1 => {}
            _ => {
                return Err(IndexError::ambiguous(format!(
                    "Delete accepts only one of ids, delete_all or filter; got {}",
                    selectors.join(", ")
                )))
            }
        }

        tracing::debug!(
            index = %self.name,
            namespace = ?params.namespace,
            selector = selectors[0],
            "Deleting vectors"
        );

        let request = DeleteRequest {
            ids: params.ids,
            delete_all: params.delete_all,
            namespace: params.namespace,
            filter: params.filter,
        };
        self.observe("delete", self.api.delete(request, &options))
            .await
    }

    /// Look up vectors by id
    pub async fn fetch(
        &self,
        params: FetchParams,
        options: TransportOptions,
    ) -> Result<FetchResponse> {
        tracing::debug!(
            index = %self.name,
            namespace = ?params.namespace,
            count = params.ids.len(),
            "Fetching vectors"
        );

        let request = FetchRequest {
            ids: params.ids,
            namespace: params.namespace,
        };
        self.observe("fetch", self.api.fetch(request, &options))
            .await
    }

    /// Similarity search by `vector`, by stored `id`, or by the deprecated
    /// `queries` list
    ///
    /// The response carries only the shape of the mode used.
    pub async fn query(
        &self,
        params: QueryParams,
        options: TransportOptions,
    ) -> Result<QueryResponse> {
        let selectors = present_names([
            ("vector", params.vector.as_ref().map(|_| ())),
            ("id", params.id.as_ref().map(|_| ())),
            ("queries", params.queries.as_ref().map(|_| ())),
        ]);
        match selectors.len() {
            0 => {
                return Err(IndexError::invalid_argument(
                    "Query needs one of vector, id or queries",
                ))
            }
            1 => {}
            _ => {
                return Err(IndexError::ambiguous(format!(
                    "Query accepts only one of vector, id or queries; got {}",
                    selectors.join(", ")
                )))
            }
        }

        let unary = params.is_unary();
        let queries = params
            .queries
            .map(|queries| {
                queries
                    .into_iter()
                    .map(QueryVectorInput::into_query_vector)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        tracing::debug!(
            index = %self.name,
            namespace = ?params.namespace,
            mode = selectors[0],
            top_k = ?params.top_k,
            "Querying index"
        );

        let request = QueryRequest {
            vector: params.vector,
            id: params.id,
            queries,
            top_k: params.top_k,
            namespace: params.namespace,
            filter: params.filter,
            include_values: params.include_values,
            include_metadata: params.include_metadata,
        };
        let raw = self
            .observe("query", self.api.query(request, &options))
            .await?;
        Ok(QueryResponse::from_raw(raw, unary))
    }

    /// Overwrite values and/or merge metadata of one vector
    pub async fn update(&self, params: UpdateParams, options: TransportOptions) -> Result<()> {
        tracing::debug!(
            index = %self.name,
            id = %params.id,
            namespace = ?params.namespace,
            "Updating vector"
        );

        let request = UpdateRequest {
            id: params.id,
            values: params.values,
            set_metadata: params.set_metadata,
            namespace: params.namespace,
        };
        self.observe("update", self.api.update(request, &options))
            .await
    }

    /// Vector counts per namespace and index dimension
    pub async fn describe_index_stats(
        &self,
        params: DescribeIndexStatsParams,
        options: TransportOptions,
    ) -> Result<DescribeIndexStatsResponse> {
        let request = DescribeIndexStatsRequest {
            filter: params.filter.unwrap_or_default(),
        };
        self.observe(
            "describe_index_stats",
            self.api.describe_index_stats(request, &options),
        )
        .await
    }

    /// Time a transport call, record it and log failures
    async fn observe<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let result = call.await;
        let elapsed = started.elapsed().as_secs_f64();

        self.metrics.record_request(operation, result.is_ok(), elapsed);
        match &result {
            Ok(_) => tracing::debug!(
                index = %self.name,
                operation,
                elapsed_ms = (elapsed * 1000.0) as u64,
                "Index operation completed"
            ),
            Err(e) => tracing::warn!(
                index = %self.name,
                operation,
                error = %e,
                "Index operation failed"
            ),
        }
        result
    }
}

/// Builder for Index
pub struct IndexBuilder {
    index_name: String,
    pool_threads: usize,
    openapi: OpenApiConfig,
    defaults: Option<ClientConfig>,
    api: Option<Arc<dyn VectorOperationsApi>>,
    metrics: Option<Arc<IndexMetrics>>,
}

impl IndexBuilder {
    /// Create a new builder with one worker and default transport settings
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            pool_threads: 1,
            openapi: OpenApiConfig::default(),
            defaults: None,
            api: None,
            metrics: None,
        }
    }

    /// Set the worker pool size
    pub fn pool_threads(mut self, threads: usize) -> Self {
        self.pool_threads = threads.max(1);
        self
    }

    /// Set the transport configuration and per-instance overrides
    pub fn openapi_config(mut self, config: OpenApiConfig) -> Self {
        self.openapi = config;
        self
    }

    /// Set the fallback API key, environment and project
    pub fn defaults(mut self, defaults: ClientConfig) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Use a custom transport instead of the REST client
    pub fn api(mut self, api: Arc<dyn VectorOperationsApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Record into shared metrics instead of a private registry
    pub fn metrics(mut self, metrics: Arc<IndexMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the async facade; no request is sent
    pub fn build(self) -> Result<Index> {
        let config = self.openapi.for_index(&self.index_name, self.defaults.as_ref());

        let api: Arc<dyn VectorOperationsApi> = match self.api {
            Some(api) => api,
            None => Arc::new(RestVectorApi::new(
                config.clone(),
                self.pool_threads,
                &user_agent(),
            )?),
        };
        let metrics = match self.metrics {
            Some(metrics) => metrics,
            None => Arc::new(IndexMetrics::new()?),
        };

        tracing::debug!(
            index = %self.index_name,
            pool_threads = self.pool_threads,
            "Built index client"
        );

        Ok(Index {
            name: Arc::from(self.index_name),
            config: Arc::new(config),
            api,
            metrics,
        })
    }

    /// Build the blocking facade backed by `pool_threads` workers
    pub fn build_blocking(self) -> Result<BlockingIndex> {
        let pool_threads = self.pool_threads;
        BlockingIndex::new(self.build()?, pool_threads)
    }
}
