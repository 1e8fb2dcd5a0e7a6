//! Error types for the upload pipeline.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::worker_pool::PoolError;

/// Errors produced while admitting, persisting, or serving uploads.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The work queue is full. This is the overload signal, not a bug.
    #[error("server is busy, try again later")]
    AdmissionRejected,
    /// The declared file name would escape the storage root or is malformed.
    #[error("invalid file name `{0}`")]
    InvalidName(String),
    /// The requested file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),
    /// The upload stream could not be opened.
    #[error("failed to open file: {0}")]
    Open(#[source] io::Error),
    /// The destination file could not be created.
    #[error("failed to create destination file: {0}")]
    Create(#[source] io::Error),
    /// Copying bytes into the destination failed part-way.
    #[error("failed to write file: {0}")]
    Write(#[source] io::Error),
    /// The storage directory could not be read.
    #[error("failed to list files: {0}")]
    List(#[source] io::Error),
    /// Any other worker pool failure.
    #[error(transparent)]
    Pool(PoolError),
}

impl From<PoolError> for PipelineError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::QueueFull => Self::AdmissionRejected,
            other => Self::Pool(other),
        }
    }
}

/// Stable, serializable classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Queue full at admission.
    AdmissionRejected,
    /// Bad file name.
    InvalidName,
    /// Missing file.
    NotFound,
    /// Upload stream could not be opened.
    OpenError,
    /// Destination could not be created.
    CreateError,
    /// Copy failed mid-stream.
    WriteError,
    /// Directory listing failed.
    ListError,
    /// Worker pool failure.
    Internal,
}

impl PipelineError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AdmissionRejected => ErrorKind::AdmissionRejected,
            Self::InvalidName(_) => ErrorKind::InvalidName,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Open(_) => ErrorKind::OpenError,
            Self::Create(_) => ErrorKind::CreateError,
            Self::Write(_) => ErrorKind::WriteError,
            Self::List(_) => ErrorKind::ListError,
            Self::Pool(_) => ErrorKind::Internal,
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
