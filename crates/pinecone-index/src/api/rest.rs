//! REST transport over `reqwest`
//!
//! Resolves the base URL from the merged [`OpenApiConfig`], attaches the
//! `Api-Key` header, encodes requests as JSON and translates non-success
//! statuses into [`IndexError`]. No retries: a failed call is reported once.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::VectorOperationsApi;
use crate::args::parse_args;
use crate::config::OpenApiConfig;
use crate::error::{IndexError, Result};
use crate::models::{
    DeleteRequest, DescribeIndexStatsRequest, DescribeIndexStatsResponse, FetchRequest,
    FetchResponse, QueryRequest, RawQueryResponse, UpdateRequest, UpsertRequest, UpsertResponse,
};
use crate::params::TransportOptions;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "Api-Key";

/// HTTP transport for the data-plane API
#[derive(Debug, Clone)]
pub struct RestVectorApi {
    client: Client,
    config: OpenApiConfig,
    base_url: String,
}

impl RestVectorApi {
    /// Build a transport bound to `config`
    ///
    /// The default base URL is resolved eagerly so an unusable configuration
    /// fails here rather than on the first call. No request is sent.
    pub fn new(config: OpenApiConfig, pool_threads: usize, user_agent: &str) -> Result<Self> {
        let base_url = config.resolve_base_url(None)?;

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .pool_max_idle_per_host(pool_threads.max(1))
            .pool_idle_timeout(Duration::from_secs(30));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(base_url = %base_url, pool_threads, "Built REST transport");

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Base URL used when no host index is requested
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, options: &TransportOptions) -> Result<String> {
        let base = match options.host_index {
            None => self.base_url.clone(),
            Some(index) => self.config.resolve_base_url(Some(index))?,
        };
        Ok(format!("{}{}", base, path))
    }

    fn prepare(&self, request: RequestBuilder, options: &TransportOptions) -> RequestBuilder {
        let mut request = request.header("Accept", "application/json");
        if let Some(key) = self.config.api_key() {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(timeout) = options.request_timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body)
                .map_err(|e| IndexError::Parse(format!("Failed to parse response: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(IndexError::from_status(status.as_u16(), body))
        }
    }

    /// For operations whose success body carries nothing
    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(IndexError::from_status(status.as_u16(), body))
        }
    }
}

#[async_trait]
impl VectorOperationsApi for RestVectorApi {
    async fn upsert(
        &self,
        request: UpsertRequest,
        options: &TransportOptions,
    ) -> Result<UpsertResponse> {
        let url = self.url("/vectors/upsert", options)?;
        let builder = self.prepare(self.client.post(&url).json(&request), options);
        self.send_json(builder).await
    }

    async fn delete(&self, request: DeleteRequest, options: &TransportOptions) -> Result<()> {
        let url = self.url("/vectors/delete", options)?;
        let builder = self.prepare(self.client.post(&url).json(&request), options);
        self.send_empty(builder).await
    }

    async fn fetch(
        &self,
        request: FetchRequest,
        options: &TransportOptions,
    ) -> Result<FetchResponse> {
        let url = self.url("/vectors/fetch", options)?;

        let mut query: Vec<(&str, String)> =
            request.ids.into_iter().map(|id| ("ids", id)).collect();
        query.extend(parse_args([("namespace", request.namespace)]));

        let builder = self.prepare(self.client.get(&url).query(&query), options);
        self.send_json(builder).await
    }

    async fn query(
        &self,
        request: QueryRequest,
        options: &TransportOptions,
    ) -> Result<RawQueryResponse> {
        let url = self.url("/query", options)?;
        let builder = self.prepare(self.client.post(&url).json(&request), options);
        self.send_json(builder).await
    }

    async fn update(&self, request: UpdateRequest, options: &TransportOptions) -> Result<()> {
        let url = self.url("/vectors/update", options)?;
        let builder = self.prepare(self.client.post(&url).json(&request), options);
        self.send_empty(builder).await
    }

    async fn describe_index_stats(
        &self,
        request: DescribeIndexStatsRequest,
        options: &TransportOptions,
    ) -> Result<DescribeIndexStatsResponse> {
        let url = self.url("/describe_index_stats", options)?;
        let builder = self.prepare(self.client.post(&url).json(&request), options);
        self.send_json(builder).await
    }
}
