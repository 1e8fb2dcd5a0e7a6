//! Upload payload sources.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Byte stream produced by an [`UploadSource`].
pub type UploadReader = Box<dyn AsyncRead + Send + Unpin>;

/// An as-yet-unread upload stream.
///
/// Opening is deferred to the worker so the admission path does no I/O.
#[async_trait]
pub trait UploadSource: Send + Sync + 'static {
    /// Open the stream for reading.
    async fn open(&self) -> io::Result<UploadReader>;
}

/// Upload content already buffered in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Arc<[u8]>,
}

impl MemorySource {
    /// Wrap buffered bytes.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait]
impl UploadSource for MemorySource {
    async fn open(&self) -> io::Result<UploadReader> {
        Ok(Box::new(io::Cursor::new(Arc::clone(&self.data))))
    }
}

/// Upload content spooled to a file on disk, e.g. a large multipart part.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read the upload from `path` when the job runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UploadSource for FileSource {
    async fn open(&self) -> io::Result<UploadReader> {
        let file = tokio::fs::File::open(&self.path).await?;
        Ok(Box::new(file))
    }
}
