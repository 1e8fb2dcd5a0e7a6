//! Upload service configuration.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::WorkerPoolConfig;
use crate::core::AppResult;

/// Environment variable naming the storage directory.
pub const ENV_UPLOAD_DIR: &str = "UPLOAD_DIR";
/// Environment variable overriding the worker count.
pub const ENV_WORKER_COUNT: &str = "UPLOAD_WORKER_COUNT";
/// Environment variable overriding the queue capacity.
pub const ENV_QUEUE_DEPTH: &str = "UPLOAD_QUEUE_DEPTH";
/// Environment variable overriding the per-worker shutdown timeout.
pub const ENV_SHUTDOWN_TIMEOUT_SECS: &str = "UPLOAD_SHUTDOWN_TIMEOUT_SECS";

/// Process-wide configuration for an [`UploadService`](crate::upload::UploadService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Flat directory that holds uploaded files.
    pub storage_dir: PathBuf,
    /// Worker pool sizing.
    pub pool: WorkerPoolConfig,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./uploads"),
            pool: WorkerPoolConfig::default(),
        }
    }
}

impl UploadConfig {
    /// Validate the storage directory and the pool settings.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.storage_dir.as_os_str().is_empty() {
            return Err("storage_dir must not be empty".into());
        }
        self.pool.validate().map_err(|e| format!("pool invalid: {e}"))
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a message on malformed JSON or invalid values.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails if a numeric variable does not parse or validation fails.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Fails if a numeric value does not parse or validation fails.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(dir) = lookup(ENV_UPLOAD_DIR) {
            cfg.storage_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_WORKER_COUNT) {
            cfg.pool.worker_count = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_WORKER_COUNT}=`{raw}` is not a number"))?;
        }
        if let Some(raw) = lookup(ENV_QUEUE_DEPTH) {
            cfg.pool.max_queue_depth = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_QUEUE_DEPTH}=`{raw}` is not a number"))?;
        }
        if let Some(raw) = lookup(ENV_SHUTDOWN_TIMEOUT_SECS) {
            cfg.pool.shutdown_timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SHUTDOWN_TIMEOUT_SECS}=`{raw}` is not a number"))?;
        }
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}
