//! Storage backends.

pub mod fs;

pub use fs::FsStorage;
