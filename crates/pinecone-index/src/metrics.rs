//! Prometheus metrics for index operations
//!
//! - `pinecone_index_requests_total` (counter) - calls by operation and result
//! - `pinecone_index_request_duration_seconds` (histogram) - call latency
//! - `pinecone_index_vectors_upserted_total` (counter) - vectors acknowledged
//!
//! # Example
//!
//! ```rust
//! use pinecone_index::metrics::IndexMetrics;
//!
//! let metrics = IndexMetrics::new().unwrap();
//! metrics.record_request("query", true, 0.012);
//! assert!(metrics.encode_text().unwrap().contains("pinecone_index_requests_total"));
//! ```

use prometheus::{
    Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::error::{IndexError, Result};

/// Index call metrics
pub struct IndexMetrics {
    registry: Arc<Registry>,

    /// Calls by operation and result
    requests_total: CounterVec,

    /// Call duration in seconds by operation
    duration_seconds: HistogramVec,

    /// Vectors reported written by the server
    vectors_upserted_total: Counter,
}

impl IndexMetrics {
    /// Create metrics on a private registry
    pub fn new() -> Result<Self> {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// Create metrics and register them with `registry`
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let requests_total = CounterVec::new(
            Opts::new("requests_total", "Total number of index operation calls")
                .namespace("pinecone_index"),
            &["operation", "result"],
        )
        .map_err(metrics_error)?;

        let duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "request_duration_seconds",
                "Index operation duration in seconds",
            )
            .namespace("pinecone_index")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["operation"],
        )
        .map_err(metrics_error)?;

        let vectors_upserted_total = Counter::new(
            "pinecone_index_vectors_upserted_total",
            "Total number of vectors acknowledged by upsert",
        )
        .map_err(metrics_error)?;

        registry
            .register(Box::new(requests_total.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(duration_seconds.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(vectors_upserted_total.clone()))
            .map_err(metrics_error)?;

        Ok(Self {
            registry,
            requests_total,
            duration_seconds,
            vectors_upserted_total,
        })
    }

    /// Record one finished call
    pub fn record_request(&self, operation: &str, success: bool, duration_secs: f64) {
        let result = if success { "success" } else { "error" };
        self.requests_total
            .with_label_values(&[operation, result])
            .inc();
        self.duration_seconds
            .with_label_values(&[operation])
            .observe(duration_secs);
    }

    /// Record vectors acknowledged by upsert
    pub fn record_upserted(&self, count: u64) {
        self.vectors_upserted_total.inc_by(count as f64);
    }

    /// Number of calls recorded for an operation and result
    pub fn request_count(&self, operation: &str, success: bool) -> u64 {
        let result = if success { "success" } else { "error" };
        self.requests_total
            .with_label_values(&[operation, result])
            .get() as u64
    }

    /// Registry the metrics live in
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Render in the Prometheus text exposition format
    pub fn encode_text(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metrics_error)?;
        String::from_utf8(buffer).map_err(|e| IndexError::Runtime(e.to_string()))
    }
}

impl std::fmt::Debug for IndexMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexMetrics").finish_non_exhaustive()
    }
}

fn metrics_error(err: prometheus::Error) -> IndexError {
    IndexError::Runtime(format!("Metrics error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request() {
        let metrics = IndexMetrics::new().unwrap();
        metrics.record_request("upsert", true, 0.01);
        metrics.record_request("upsert", true, 0.02);
        metrics.record_request("upsert", false, 0.5);

        assert_eq!(metrics.request_count("upsert", true), 2);
        assert_eq!(metrics.request_count("upsert", false), 1);
        assert_eq!(metrics.request_count("query", true), 0);
    }

    #[test]
    fn test_encode_text() {
        let metrics = IndexMetrics::new().unwrap();
        metrics.record_request("fetch", true, 0.003);
        metrics.record_upserted(42);

        let text = metrics.encode_text().unwrap();
        assert!(text.contains("pinecone_index_requests_total"));
        assert!(text.contains("pinecone_index_request_duration_seconds"));
        assert!(text.contains("pinecone_index_vectors_upserted_total 42"));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = Arc::new(Registry::new());
        IndexMetrics::with_registry(registry.clone()).unwrap();
        let err = IndexMetrics::with_registry(registry).unwrap_err();
        assert!(matches!(err, IndexError::Runtime(_)));
    }
}
