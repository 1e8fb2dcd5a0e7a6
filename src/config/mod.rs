//! Configuration models for the worker pool and the upload service.

pub mod pool;
pub mod upload;

pub use pool::WorkerPoolConfig;
pub use upload::UploadConfig;
