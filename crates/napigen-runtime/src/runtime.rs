//! Worker pool backing async exports

use crate::error::{BridgeError, BridgeResult};
use tokio::runtime::{Builder, Runtime};

/// Configuration for the worker pool
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of scheduler threads (None = number of CPU cores)
    pub worker_threads: Option<usize>,
    /// Name prefix for pool threads
    pub thread_name: String,
    /// Upper bound on concurrently executing async exports
    pub max_blocking_threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            thread_name: "napigen-worker".to_string(),
            // Matches the default libuv thread pool size.
            max_blocking_threads: 4,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_max_blocking_threads(mut self, threads: usize) -> Self {
        self.max_blocking_threads = threads;
        self
    }
}

/// Owns the Tokio runtime async exports are scheduled on
pub struct AsyncRuntime {
    runtime: Runtime,
    config: RuntimeConfig,
}

impl AsyncRuntime {
    pub fn new(config: RuntimeConfig) -> BridgeResult<Self> {
        let mut builder = Builder::new_multi_thread();

        if let Some(threads) = config.worker_threads {
            builder.worker_threads(threads);
        }

        let runtime = builder
            .thread_name(&config.thread_name)
            .max_blocking_threads(config.max_blocking_threads.max(1))
            .enable_time()
            .build()
            .map_err(|e| BridgeError::Runtime(format!("failed to create runtime: {e}")))?;

        tracing::debug!(
            "worker pool '{}' started with {} blocking thread(s)",
            config.thread_name,
            config.max_blocking_threads
        );

        Ok(Self {
            runtime,
            config,
        })
    }

    pub fn with_defaults() -> BridgeResult<Self> {
        Self::new(RuntimeConfig::default())
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Block the calling thread until `future` completes
    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
#[path = "runtime/runtime_tests.rs"]
mod runtime_tests;
