//! Job execution trait.

use async_trait::async_trait;

use super::JobMetadata;

/// Turns a job payload into an outcome.
///
/// Called on a dedicated worker thread, inside that worker's single-threaded
/// tokio runtime, so implementations may freely await I/O. The returned value
/// is handed to the job's notifier; failures are expected to be encoded in `R`
/// rather than panicking.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use upload_pool::core::{JobMetadata, WorkerExecutor};
///
/// #[derive(Clone)]
/// struct Echo;
///
/// #[async_trait]
/// impl WorkerExecutor<String, String> for Echo {
///     async fn execute(&self, payload: String, _meta: JobMetadata) -> String {
///         payload
///     }
/// }
/// ```
#[async_trait]
pub trait WorkerExecutor<P, R>: Send + Sync + Clone + 'static
where
    P: Send + 'static,
    R: Send + 'static,
{
    /// Execute a payload and return its outcome.
    async fn execute(&self, payload: P, meta: JobMetadata) -> R;
}
