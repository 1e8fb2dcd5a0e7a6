//! Upload service: the process-wide context owning storage and the pool.

use std::path::PathBuf;
use std::sync::Arc;

use super::{StorageExecutor, Upload, UploadOutcome, UploadSource};
use crate::config::WorkerPoolConfig;
use crate::core::{
    CompletionHandle, JobMetadata, Notifier, PipelineError, PoolStats, WorkerExecutor, WorkerPool,
};
use crate::infra::storage::FsStorage;

/// Storage plus worker pool, built once by the process entry point and passed
/// to whatever handles inbound requests.
///
/// ```rust,ignore
/// let service = UploadService::start(Arc::new(FsStorage::new("./uploads")?), WorkerPoolConfig::new())?;
/// let handle = service.submit("a.txt", MemorySource::new(b"hi".to_vec()))?;
/// let outcome = handle.wait().await?;
/// ```
pub struct UploadService<E = StorageExecutor<FsStorage>>
where
    E: WorkerExecutor<Upload, UploadOutcome>,
{
    storage: Arc<FsStorage>,
    pool: WorkerPool<Upload, UploadOutcome, E>,
}

impl UploadService {
    /// Start a pool whose workers persist into `storage`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Pool`] if the pool configuration is invalid or the
    /// workers cannot be started.
    pub fn start(storage: Arc<FsStorage>, config: WorkerPoolConfig) -> Result<Self, PipelineError> {
        let executor = StorageExecutor::new(Arc::clone(&storage));
        Self::with_executor(storage, config, executor)
    }
}

impl<E> UploadService<E>
where
    E: WorkerExecutor<Upload, UploadOutcome>,
{
    /// Start a pool with a custom executor; listing and downloads still read
    /// from `storage`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Pool`] if the pool cannot be started.
    pub fn with_executor(
        storage: Arc<FsStorage>,
        config: WorkerPoolConfig,
        executor: E,
    ) -> Result<Self, PipelineError> {
        let pool = WorkerPool::new(config, executor)?;
        Ok(Self { storage, pool })
    }

    /// Validate the name and admit the upload without blocking.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidName`] before anything is enqueued
    /// - [`PipelineError::AdmissionRejected`] when the queue is full
    /// - [`PipelineError::Pool`] after shutdown
    pub fn submit(
        &self,
        filename: &str,
        source: impl UploadSource,
    ) -> Result<CompletionHandle<UploadOutcome>, PipelineError> {
        self.submit_upload(Upload::new(filename, source)?)
    }

    /// Admit an already built upload.
    ///
    /// # Errors
    ///
    /// As [`submit`](Self::submit), minus name validation.
    pub fn submit_upload(
        &self,
        upload: Upload,
    ) -> Result<CompletionHandle<UploadOutcome>, PipelineError> {
        Ok(self.pool.submit(upload)?)
    }

    /// Admit an upload whose outcome goes to a caller-supplied notifier.
    ///
    /// # Errors
    ///
    /// As [`submit_upload`](Self::submit_upload).
    pub fn submit_with_notifier(
        &self,
        upload: Upload,
        notifier: Notifier<UploadOutcome>,
    ) -> Result<JobMetadata, PipelineError> {
        Ok(self.pool.submit_with_notifier(upload, notifier)?)
    }

    /// Names of stored files, sorted.
    ///
    /// # Errors
    ///
    /// [`PipelineError::List`] if the storage directory cannot be read.
    pub fn list_files(&self) -> Result<Vec<String>, PipelineError> {
        self.storage.list()
    }

    /// Contents of a stored file.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NotFound`] or [`PipelineError::InvalidName`].
    pub fn download(&self, filename: &str) -> Result<Vec<u8>, PipelineError> {
        self.storage.read(filename)
    }

    /// Path of a stored file, for adapters that stream it themselves.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NotFound`] or [`PipelineError::InvalidName`].
    pub fn locate(&self, filename: &str) -> Result<PathBuf, PipelineError> {
        self.storage.locate(filename)
    }

    /// Pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Storage backing this service.
    #[must_use]
    pub const fn storage(&self) -> &Arc<FsStorage> {
        &self.storage
    }

    /// Stop admission and wait for accepted uploads to finish.
    pub fn shutdown(&self) {
        self.pool.shutdown();
    }
}
