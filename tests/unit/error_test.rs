//! Tests for error types

use std::io;

use upload_pool::core::{ErrorKind, PipelineError, PoolError};

#[test]
fn test_pool_error_display() {
    assert_eq!(PoolError::QueueFull.to_string(), "work queue is full");
    assert_eq!(PoolError::PoolShutdown.to_string(), "pool has been shut down");
}

#[test]
fn test_queue_full_becomes_admission_rejected() {
    let err = PipelineError::from(PoolError::QueueFull);
    assert!(matches!(err, PipelineError::AdmissionRejected));
    assert_eq!(err.kind(), ErrorKind::AdmissionRejected);
    assert_eq!(err.to_string(), "server is busy, try again later");
}

#[test]
fn test_stage_errors() {
    let io_err = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");

    assert_eq!(PipelineError::Open(io_err()).kind(), ErrorKind::OpenError);
    assert_eq!(PipelineError::Create(io_err()).kind(), ErrorKind::CreateError);
    assert_eq!(PipelineError::Write(io_err()).kind(), ErrorKind::WriteError);
    assert_eq!(
        PipelineError::Create(io_err()).to_string(),
        "failed to create destination file: denied"
    );
}

#[test]
fn test_error_kind_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&ErrorKind::OpenError).unwrap(), r#""open_error""#);
    assert_eq!(
        serde_json::to_string(&ErrorKind::AdmissionRejected).unwrap(),
        r#""admission_rejected""#
    );
}

#[test]
fn test_invalid_name_display() {
    let err = PipelineError::InvalidName("../x".into());
    assert_eq!(err.to_string(), "invalid file name `../x`");
}
