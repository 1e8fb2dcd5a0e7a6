//! Builder turning an [`UploadConfig`] into a running [`UploadService`].

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::UploadConfig;
use crate::core::AppResult;
use crate::infra::storage::FsStorage;
use crate::upload::UploadService;

/// Validate `cfg`, prepare the storage directory, and start the worker pool.
///
/// # Errors
///
/// Fails on invalid configuration, an unusable storage directory, or if the
/// workers cannot be started.
pub fn build_upload_service(cfg: &UploadConfig) -> AppResult<UploadService> {
    cfg.validate()
        .map_err(|e| anyhow::anyhow!("config invalid: {e}"))?;

    let storage = FsStorage::new(&cfg.storage_dir).with_context(|| {
        format!(
            "failed to create upload directory `{}`",
            cfg.storage_dir.display()
        )
    })?;

    let service = UploadService::start(Arc::new(storage), cfg.pool.clone())
        .context("failed to start upload worker pool")?;

    info!(
        storage_dir = %cfg.storage_dir.display(),
        worker_count = cfg.pool.worker_count,
        max_queue_depth = cfg.pool.max_queue_depth,
        "Upload service started"
    );
    Ok(service)
}
