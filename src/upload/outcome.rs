//! Terminal outcome of an upload job.

use serde::{Deserialize, Serialize};

use crate::core::{ErrorKind, PipelineError};

/// What a worker reports through the job's notifier.
///
/// Serializes as `{"status":"ok","filename":..,"bytes":..}` or
/// `{"status":"error","kind":..,"message":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    /// The file was fully written.
    #[serde(rename = "ok")]
    Success {
        /// Stored file name.
        filename: String,
        /// Bytes copied.
        bytes: u64,
    },
    /// One pipeline stage failed; the job was abandoned.
    #[serde(rename = "error")]
    Failure {
        /// Stage that failed.
        kind: ErrorKind,
        /// Human-readable reason.
        message: String,
    },
}

impl UploadOutcome {
    /// Successful outcome.
    pub fn success(filename: impl Into<String>, bytes: u64) -> Self {
        Self::Success {
            filename: filename.into(),
            bytes,
        }
    }

    /// Failed outcome.
    #[must_use]
    pub fn failure(err: &PipelineError) -> Self {
        Self::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Whether the upload was stored.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Failure classification, if any.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_wire_format() {
        let json = serde_json::to_value(UploadOutcome::success("a.txt", 3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "ok", "filename": "a.txt", "bytes": 3})
        );
    }

    #[test]
    fn failure_wire_format() {
        let err = PipelineError::Create(std::io::Error::other("disk full"));
        let json = serde_json::to_value(UploadOutcome::failure(&err)).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "create_error");
        assert_eq!(json["message"], "failed to create destination file: disk full");
    }
}
