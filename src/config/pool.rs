//! Worker pool configuration.

use serde::{Deserialize, Serialize};

/// Default number of worker threads.
pub const DEFAULT_WORKER_COUNT: usize = 5;
/// Default capacity of the bounded work queue.
pub const DEFAULT_MAX_QUEUE_DEPTH: usize = 100;
/// Default stack size for worker threads (2 MiB).
pub const DEFAULT_THREAD_STACK_SIZE: usize = 2 * 1024 * 1024;
/// Default time to wait for each worker during shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Configuration for a [`WorkerPool`](crate::core::WorkerPool).
///
/// Both `worker_count` and `max_queue_depth` are fixed once the pool is built.
///
/// ```rust
/// use upload_pool::config::WorkerPoolConfig;
///
/// let config = WorkerPoolConfig::new()
///     .with_worker_count(2)
///     .with_max_queue_depth(16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerPoolConfig {
    /// Number of long-lived worker threads.
    pub worker_count: usize,
    /// Capacity of the work queue; admission is rejected beyond it.
    pub max_queue_depth: usize,
    /// Stack size for each worker thread, in bytes.
    pub thread_stack_size: usize,
    /// Upper bound on how long `shutdown` waits for each worker to drain.
    pub shutdown_timeout_secs: u64,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            max_queue_depth: DEFAULT_MAX_QUEUE_DEPTH,
            thread_stack_size: DEFAULT_THREAD_STACK_SIZE,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl WorkerPoolConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the capacity of the work queue.
    #[must_use]
    pub const fn with_max_queue_depth(mut self, max_queue_depth: usize) -> Self {
        self.max_queue_depth = max_queue_depth;
        self
    }

    /// Set the worker thread stack size.
    #[must_use]
    pub const fn with_thread_stack_size(mut self, thread_stack_size: usize) -> Self {
        self.thread_stack_size = thread_stack_size;
        self
    }

    /// Set the per-worker shutdown timeout.
    #[must_use]
    pub const fn with_shutdown_timeout_secs(mut self, secs: u64) -> Self {
        self.shutdown_timeout_secs = secs;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be greater than 0".into());
        }
        if self.max_queue_depth == 0 {
            return Err("max_queue_depth must be greater than 0".into());
        }
        if self.thread_stack_size < 64 * 1024 {
            return Err("thread_stack_size must be at least 64 KiB".into());
        }
        if self.shutdown_timeout_secs == 0 {
            return Err("shutdown_timeout_secs must be greater than 0".into());
        }
        Ok(())
    }
}
