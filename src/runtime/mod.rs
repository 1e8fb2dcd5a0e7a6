//! Transport-neutral API surface for request adapters.

pub mod api;

pub use api::{ApiResponse, Body, JsonBody};
