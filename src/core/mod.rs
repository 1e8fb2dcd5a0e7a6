//! Core pipeline: bounded queue, worker pool, job model and completion channel.

pub mod error;
pub mod executor;
pub mod job;
pub mod notifier;
pub mod queue;
pub mod worker_pool;

pub use error::{AppResult, ErrorKind, PipelineError};
pub use executor::WorkerExecutor;
pub use job::{JobId, JobMetadata};
pub use notifier::{completion_channel, CompletionHandle, Notifier};
pub use queue::{PushError, QueueConsumer, QueueProducer};
pub use worker_pool::{PoolError, PoolStats, WorkerPool};
