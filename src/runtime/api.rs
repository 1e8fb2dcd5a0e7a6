//! API-facing request/response models.
//!
//! These functions do what the upload server's routes did, minus the HTTP
//! framework: an adapter calls them and copies `status_code` and `body` onto
//! its own response type.

use serde::{Deserialize, Serialize};

use crate::core::{ErrorKind, PipelineError, WorkerExecutor};
use crate::upload::{Upload, UploadOutcome, UploadService, UploadSource};

/// Synchronous answer when the queue is full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Always `rejected`.
    pub status: String,
    /// Always `overloaded`.
    pub reason: String,
}

impl Rejection {
    /// The overload rejection.
    #[must_use]
    pub fn overloaded() -> Self {
        Self {
            status: "rejected".into(),
            reason: "overloaded".into(),
        }
    }
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `error`.
    pub status: String,
    /// Error classification.
    pub kind: ErrorKind,
    /// Human-readable reason.
    pub message: String,
}

impl From<&PipelineError> for ErrorResponse {
    fn from(err: &PipelineError) -> Self {
        Self {
            status: "error".into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// File listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Stored file names.
    pub files: Vec<String>,
}

/// Health response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Any JSON response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonBody {
    /// Terminal upload outcome.
    Outcome(UploadOutcome),
    /// Admission rejection.
    Rejected(Rejection),
    /// Request or storage error.
    Error(ErrorResponse),
    /// File listing.
    Files(ListResponse),
    /// Health probe.
    Health(Health),
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// JSON document.
    Json(JsonBody),
    /// File download.
    Attachment {
        /// Name to offer the client.
        filename: String,
        /// File contents.
        data: Vec<u8>,
    },
}

/// Status code plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body.
    pub body: Body,
}

impl ApiResponse {
    fn json(status_code: u16, body: JsonBody) -> Self {
        Self {
            status_code,
            body: Body::Json(body),
        }
    }

    fn error(err: &PipelineError) -> Self {
        if matches!(err, PipelineError::AdmissionRejected) {
            return Self::json(503, JsonBody::Rejected(Rejection::overloaded()));
        }
        Self::json(status_for(err.kind()), JsonBody::Error(err.into()))
    }

    /// Serialize a JSON body. Returns `None` for attachments.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn json_string(&self) -> Result<Option<String>, serde_json::Error> {
        match &self.body {
            Body::Json(body) => serde_json::to_string(body).map(Some),
            Body::Attachment { .. } => Ok(None),
        }
    }
}

/// HTTP status code for an error classification.
#[must_use]
pub const fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::AdmissionRejected => 503,
        ErrorKind::InvalidName => 400,
        ErrorKind::NotFound => 404,
        ErrorKind::OpenError
        | ErrorKind::CreateError
        | ErrorKind::WriteError
        | ErrorKind::ListError
        | ErrorKind::Internal => 500,
    }
}

/// Submit an upload and wait for its outcome.
///
/// Rejections (bad name, full queue) answer immediately without enqueueing.
pub async fn upload<E>(
    service: &UploadService<E>,
    filename: &str,
    source: impl UploadSource,
) -> ApiResponse
where
    E: WorkerExecutor<Upload, UploadOutcome>,
{
    let handle = match service.submit(filename, source) {
        Ok(handle) => handle,
        Err(err) => return ApiResponse::error(&err),
    };

    match handle.wait().await {
        Ok(outcome) => {
            let status_code = outcome.error_kind().map_or(200, status_for);
            ApiResponse::json(status_code, JsonBody::Outcome(outcome))
        }
        Err(err) => ApiResponse::error(&PipelineError::from(err)),
    }
}

/// List stored files.
pub fn list<E>(service: &UploadService<E>) -> ApiResponse
where
    E: WorkerExecutor<Upload, UploadOutcome>,
{
    match service.list_files() {
        Ok(files) => ApiResponse::json(200, JsonBody::Files(ListResponse { files })),
        Err(err) => ApiResponse::error(&err),
    }
}

/// Download a stored file by exact name.
pub fn download<E>(service: &UploadService<E>, filename: Option<&str>) -> ApiResponse
where
    E: WorkerExecutor<Upload, UploadOutcome>,
{
    let Some(filename) = filename.filter(|f| !f.is_empty()) else {
        return ApiResponse::error(&PipelineError::InvalidName(String::new()));
    };

    match service.download(filename) {
        Ok(data) => ApiResponse {
            status_code: 200,
            body: Body::Attachment {
                filename: filename.to_owned(),
                data,
            },
        },
        Err(err) => ApiResponse::error(&err),
    }
}

/// Liveness probe: always 200 `{"ok":true}`.
#[must_use]
pub const fn health() -> ApiResponse {
    ApiResponse {
        status_code: 200,
        body: Body::Json(JsonBody::Health(Health { ok: true })),
    }
}
