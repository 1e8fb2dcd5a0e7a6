//! Tests for configuration loading and validation

use std::collections::HashMap;
use std::path::PathBuf;

use upload_pool::config::pool::{DEFAULT_MAX_QUEUE_DEPTH, DEFAULT_WORKER_COUNT};
use upload_pool::config::{UploadConfig, WorkerPoolConfig};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let cfg = UploadConfig::default();
    assert_eq!(cfg.storage_dir, PathBuf::from("./uploads"));
    assert_eq!(cfg.pool.worker_count, DEFAULT_WORKER_COUNT);
    assert_eq!(cfg.pool.max_queue_depth, DEFAULT_MAX_QUEUE_DEPTH);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_from_json_partial() {
    let json = r#"{
        "storage_dir": "/srv/uploads",
        "pool": { "worker_count": 8 }
    }"#;

    let cfg = UploadConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.storage_dir, PathBuf::from("/srv/uploads"));
    assert_eq!(cfg.pool.worker_count, 8);
    assert_eq!(cfg.pool.max_queue_depth, DEFAULT_MAX_QUEUE_DEPTH);
}

#[test]
fn test_from_json_rejects_zero_workers() {
    let err = UploadConfig::from_json_str(r#"{"pool": {"worker_count": 0}}"#).unwrap_err();
    assert!(err.contains("pool invalid"), "{err}");
}

#[test]
fn test_from_json_malformed() {
    let err = UploadConfig::from_json_str("{not json").unwrap_err();
    assert!(err.starts_with("parse error"), "{err}");
}

#[test]
fn test_from_lookup_overrides() {
    let cfg = UploadConfig::from_lookup(lookup_from(&[
        ("UPLOAD_DIR", "/tmp/incoming"),
        ("UPLOAD_WORKER_COUNT", " 3 "),
        ("UPLOAD_QUEUE_DEPTH", "12"),
        ("UPLOAD_SHUTDOWN_TIMEOUT_SECS", "4"),
    ]))
    .unwrap();

    assert_eq!(
        cfg,
        UploadConfig {
            storage_dir: PathBuf::from("/tmp/incoming"),
            pool: WorkerPoolConfig::new()
                .with_worker_count(3)
                .with_max_queue_depth(12)
                .with_shutdown_timeout_secs(4),
        }
    );
}

#[test]
fn test_from_lookup_empty_is_default() {
    let cfg = UploadConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, UploadConfig::default());
}

#[test]
fn test_from_lookup_bad_number() {
    let err = UploadConfig::from_lookup(lookup_from(&[("UPLOAD_QUEUE_DEPTH", "lots")])).unwrap_err();
    assert!(err.to_string().contains("UPLOAD_QUEUE_DEPTH"), "{err}");
}

#[test]
fn test_from_lookup_zero_depth_fails_validation() {
    assert!(UploadConfig::from_lookup(lookup_from(&[("UPLOAD_QUEUE_DEPTH", "0")])).is_err());
}
