//! Builders to construct services from configuration.

pub mod service_builder;

pub use service_builder::build_upload_service;
