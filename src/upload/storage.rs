//! Storage sink abstraction.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::FileName;
use crate::core::PipelineError;

/// Durable destination for upload streams.
#[async_trait]
pub trait StorageSink: Send + Sync + 'static {
    /// Create `name` and copy `reader` into it, returning the byte count.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Create`] if the destination cannot be created,
    /// [`PipelineError::Write`] if the copy fails part-way. A partially
    /// written destination is left in place.
    async fn persist(
        &self,
        name: &FileName,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64, PipelineError>;
}
