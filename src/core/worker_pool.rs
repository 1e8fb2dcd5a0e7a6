//! Fixed-size worker pool draining a bounded work queue.
//!
//! The pool is the processing half of the pipeline. Admission
//! ([`WorkerPool::submit`]) is a non-blocking push into a bounded queue and
//! answers accept/reject immediately; a fixed set of dedicated OS threads pops
//! jobs in FIFO order, runs the executor, and completes each job's notifier.
//!
//! # Key Features
//!
//! - **Backpressure**: a full queue rejects synchronously with `QueueFull`
//! - **Bounded processing**: exactly `worker_count` jobs run at once
//! - **Exactly-once completion**: every accepted job yields one outcome or
//!   `Abandoned`, never both
//! - **Drain on shutdown**: accepted jobs finish before workers exit
//!
//! # Example
//!
//! ```rust,ignore
//! use upload_pool::config::WorkerPoolConfig;
//! use upload_pool::core::WorkerPool;
//!
//! let pool = WorkerPool::new(
//!     WorkerPoolConfig::new().with_worker_count(4).with_max_queue_depth(100),
//!     my_executor,
//! )?;
//!
//! let handle = pool.submit(job)?;
//! let outcome = handle.wait().await?;
//! ```

mod native;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use native::WorkerPool;

/// Errors that can occur when using a `WorkerPool`.
#[derive(Debug)]
pub enum PoolError {
    /// The work queue is full; the job was not accepted.
    QueueFull,

    /// The pool has been shut down and no longer admits jobs.
    PoolShutdown,

    /// Waiting for an outcome timed out.
    Timeout,

    /// The job was accepted but its notifier was dropped without an outcome
    /// (for example the executor panicked).
    Abandoned,

    /// Configuration validation failed.
    InvalidConfig(String),

    /// Internal error (worker runtime or thread could not be created).
    Internal(String),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "work queue is full"),
            Self::PoolShutdown => write!(f, "pool has been shut down"),
            Self::Timeout => write!(f, "operation timed out"),
            Self::Abandoned => write!(f, "job was abandoned before completing"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Statistics about pool utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of worker threads.
    pub worker_count: usize,

    /// Fixed capacity of the work queue.
    pub queue_capacity: usize,

    /// Jobs waiting in the queue.
    pub queued_jobs: usize,

    /// Jobs currently being executed.
    pub active_jobs: u64,

    /// Jobs accepted by admission.
    pub submitted_jobs: u64,

    /// Admission attempts rejected because the queue was full.
    pub rejected_jobs: u64,

    /// Jobs whose executor returned an outcome.
    pub completed_jobs: u64,

    /// Jobs whose executor panicked.
    pub abandoned_jobs: u64,
}

/// Internal counters for pool statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub active_jobs: AtomicU64,
    pub submitted_jobs: AtomicU64,
    pub rejected_jobs: AtomicU64,
    pub completed_jobs: AtomicU64,
    pub abandoned_jobs: AtomicU64,
}

impl PoolCounters {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self, worker_count: usize, queue_capacity: usize, queued_jobs: usize) -> PoolStats {
        PoolStats {
            worker_count,
            queue_capacity,
            queued_jobs,
            active_jobs: self.active_jobs.load(Ordering::Relaxed),
            submitted_jobs: self.submitted_jobs.load(Ordering::Relaxed),
            rejected_jobs: self.rejected_jobs.load(Ordering::Relaxed),
            completed_jobs: self.completed_jobs.load(Ordering::Relaxed),
            abandoned_jobs: self.abandoned_jobs.load(Ordering::Relaxed),
        }
    }
}
