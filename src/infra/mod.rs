//! Infrastructure adapters: storage backends.

pub mod storage;

pub use storage::FsStorage;
