//! # Upload Pool
//!
//! A bounded upload-processing pipeline: requests are admitted into a
//! fixed-capacity queue without ever blocking, a fixed set of worker threads
//! drains that queue and writes each upload to disk, and every accepted job
//! reports its outcome exactly once through a one-shot completion channel.
//!
//! ## Core Problem Solved
//!
//! Accepting uploads is cheap; persisting them is not. Coupling the two lets a
//! burst of requests pile up unbounded work. This crate keeps the two sides
//! apart:
//!
//! - **Unbounded admission, bounded processing**: any number of request
//!   handlers may call `submit`, only `worker_count` uploads are written at once
//! - **Backpressure instead of queueing forever**: a full queue rejects
//!   synchronously with `{"status":"rejected","reason":"overloaded"}`
//! - **Disconnected clients are harmless**: a worker completing a job whose
//!   caller went away simply discards the outcome
//!
//! ## Components
//!
//! - [`core::queue`]: bounded FIFO (`try_push` / `pop`)
//! - [`core::WorkerPool`]: admission gate plus worker threads
//! - [`core::notifier`]: one-shot `Notifier` / `CompletionHandle`
//! - [`upload`]: validated names, upload sources, the storage executor and
//!   the [`upload::UploadService`] context object
//! - [`infra::storage::FsStorage`]: flat-directory storage sink
//! - [`runtime::api`]: transport-neutral upload / list / download responses
//!
//! ```rust,ignore
//! use upload_pool::builders::build_upload_service;
//! use upload_pool::config::UploadConfig;
//! use upload_pool::upload::MemorySource;
//!
//! let service = build_upload_service(&UploadConfig::from_env()?)?;
//!
//! let handle = service.submit("a.txt", MemorySource::new(b"hello".to_vec()))?;
//! let outcome = handle.wait().await?;
//! assert!(outcome.is_success());
//!
//! assert_eq!(service.download("a.txt")?, b"hello");
//! service.shutdown();
//! ```
//!
//! For complete examples, see `tests/upload_pipeline_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core pipeline: queue, worker pool, jobs and completion.
pub mod core;
/// Configuration models for the pool and the upload service.
pub mod config;
/// Builders to construct services from configuration.
pub mod builders;
/// Infrastructure adapters for storage backends.
pub mod infra;
/// Transport-neutral API surface.
pub mod runtime;
/// Upload domain types and the service context.
pub mod upload;
/// Shared utilities.
pub mod util;
