//! Blocking call surface over a fixed worker pool
//!
//! [`BlockingIndex`] owns a multi-threaded runtime with exactly the number of
//! workers requested at construction. Plain methods block the caller for the
//! full round trip. [`BlockingIndex::submit`] dispatches a call onto the pool
//! and returns a [`PendingCall`] immediately.
//!
//! Calls issued concurrently on one instance carry no ordering guarantee.
//! Blocking methods must not be called from inside an async runtime.

use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::error::{IndexError, Result};
use crate::index::Index;
use crate::models::{DescribeIndexStatsResponse, FetchResponse, QueryResponse, UpsertResponse};
use crate::params::{
    DeleteParams, DescribeIndexStatsParams, FetchParams, QueryParams, TransportOptions,
    UpdateParams, UpsertParams,
};

/// Synchronous facade over one remote index
pub struct BlockingIndex {
    index: Index,
    runtime: Arc<Runtime>,
    pool_threads: usize,
}

impl BlockingIndex {
    /// Wrap `index` with a pool of `pool_threads` workers
    pub fn new(index: Index, pool_threads: usize) -> Result<Self> {
        let pool_threads = pool_threads.max(1);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(pool_threads)
            .thread_name("pinecone-index-worker")
            .enable_all()
            .build()
            .map_err(|e| IndexError::Runtime(format!("Failed to start worker pool: {}", e)))?;

        Ok(Self {
            index,
            runtime: Arc::new(runtime),
            pool_threads,
        })
    }

    /// The async facade backing this instance
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Worker pool size
    pub fn pool_threads(&self) -> usize {
        self.pool_threads
    }

    pub fn upsert(
        &self,
        params: UpsertParams,
        options: TransportOptions,
    ) -> Result<UpsertResponse> {
        self.runtime.block_on(self.index.upsert(params, options))
    }

    pub fn delete(&self, params: DeleteParams, options: TransportOptions) -> Result<()> {
        self.runtime.block_on(self.index.delete(params, options))
    }

    pub fn fetch(&self, params: FetchParams, options: TransportOptions) -> Result<FetchResponse> {
        self.runtime.block_on(self.index.fetch(params, options))
    }

    pub fn query(&self, params: QueryParams, options: TransportOptions) -> Result<QueryResponse> {
        self.runtime.block_on(self.index.query(params, options))
    }

    pub fn update(&self, params: UpdateParams, options: TransportOptions) -> Result<()> {
        self.runtime.block_on(self.index.update(params, options))
    }

    pub fn describe_index_stats(
        &self,
        params: DescribeIndexStatsParams,
        options: TransportOptions,
    ) -> Result<DescribeIndexStatsResponse> {
        self.runtime
            .block_on(self.index.describe_index_stats(params, options))
    }

    /// Run a call on the worker pool without blocking
    ///
    /// ```rust,no_run
    /// # use pinecone_index::{BlockingIndex, DescribeIndexStatsParams, TransportOptions};
    /// # fn run(index: BlockingIndex) -> pinecone_index::Result<()> {
    /// let pending = index.submit(|index| async move {
    ///     index
    ///         .describe_index_stats(DescribeIndexStatsParams::new(), TransportOptions::default())
    ///         .await
    /// });
    /// let stats = pending.wait()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit<F, Fut, T>(&self, call: F) -> PendingCall<T>
    where
        F: FnOnce(Index) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let handle = self.runtime.spawn(call(self.index.clone()));
        PendingCall {
            handle,
            runtime: Arc::clone(&self.runtime),
        }
    }
}

/// Handle to a call running on the worker pool
pub struct PendingCall<T> {
    handle: JoinHandle<Result<T>>,
    runtime: Arc<Runtime>,
}

impl<T> PendingCall<T> {
    /// Block until the call finishes
    pub fn wait(self) -> Result<T> {
        self.runtime
            .block_on(self.handle)
            .map_err(|e| IndexError::Runtime(format!("Submitted call did not complete: {}", e)))?
    }

    /// True once the call has finished, successfully or not
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the call; a later `wait` reports a runtime error
    pub fn abort(&self) {
        self.handle.abort();
    }
}
