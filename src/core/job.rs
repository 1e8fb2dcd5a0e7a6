//! Job model: one unit of work travelling through the queue.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::notifier::Notifier;

/// Unique identifier assigned at admission.
pub type JobId = Uuid;

/// Metadata attached to every admitted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Unique job identifier.
    pub id: JobId,
    /// Admission order within the pool, starting at 0.
    pub sequence: u64,
    /// Admission timestamp in milliseconds since the Unix epoch.
    pub created_at_ms: u128,
}

impl JobMetadata {
    /// Fresh metadata for the job admitted at position `sequence`.
    #[must_use]
    pub fn new(sequence: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            created_at_ms: crate::util::clock::now_ms(),
        }
    }
}

/// A queued job: payload, metadata, and the notifier its worker must complete.
///
/// Immutable once enqueued; consumed by exactly one worker.
#[derive(Debug)]
pub(crate) struct Job<P, R> {
    pub payload: P,
    pub meta: JobMetadata,
    pub notifier: Notifier<R>,
}
