//! Executor that persists uploads through a [`StorageSink`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{StorageSink, Upload, UploadOutcome};
use crate::core::{JobMetadata, PipelineError, WorkerExecutor};
use crate::infra::storage::FsStorage;

/// Open, create, copy. Each stage runs at most once; no retries.
pub struct StorageExecutor<S = FsStorage> {
    sink: Arc<S>,
}

impl<S> Clone for StorageExecutor<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: StorageSink> StorageExecutor<S> {
    /// Persist uploads into `sink`.
    pub const fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    async fn store(&self, upload: Upload) -> Result<u64, PipelineError> {
        let (name, source) = upload.into_parts();
        let mut reader = source.open().await.map_err(PipelineError::Open)?;
        self.sink.persist(&name, &mut *reader).await
    }
}

#[async_trait]
impl<S: StorageSink> WorkerExecutor<Upload, UploadOutcome> for StorageExecutor<S> {
    async fn execute(&self, upload: Upload, meta: JobMetadata) -> UploadOutcome {
        let filename = upload.name().to_string();
        match self.store(upload).await {
            Ok(bytes) => {
                info!(job_id = %meta.id, filename = %filename, bytes, "Upload stored");
                UploadOutcome::success(filename, bytes)
            }
            Err(err) => {
                warn!(job_id = %meta.id, filename = %filename, error = %err, "Upload failed");
                UploadOutcome::failure(&err)
            }
        }
    }
}
