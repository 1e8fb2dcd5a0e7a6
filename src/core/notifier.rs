//! One-shot completion channel between a worker and the job's originator.
//!
//! [`Notifier::complete`] takes `self`, so a job can report at most once. If the
//! notifier is dropped without completing (executor panic, pool torn down),
//! the waiting [`CompletionHandle`] resolves to [`PoolError::Abandoned`], which
//! keeps the "exactly one outcome" contract on every path.

use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;

use super::worker_pool::PoolError;

/// Create a connected notifier / handle pair.
#[must_use]
pub fn completion_channel<R>() -> (Notifier<R>, CompletionHandle<R>) {
    let (tx, rx) = oneshot::channel();
    (Notifier { tx }, CompletionHandle { rx })
}

/// Write side, owned by the job until a worker completes it.
#[derive(Debug)]
pub struct Notifier<R> {
    tx: oneshot::Sender<R>,
}

impl<R> Notifier<R> {
    /// Deliver the outcome.
    ///
    /// Never blocks. If the receiving side is gone the outcome is discarded
    /// and `false` is returned; the caller has nothing else to do about it.
    pub fn complete(self, outcome: R) -> bool {
        if self.tx.send(outcome).is_ok() {
            true
        } else {
            debug!("completion receiver dropped before outcome was delivered");
            false
        }
    }

    /// Whether the receiving side has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read side, held by whoever awaits the job's outcome.
#[derive(Debug)]
pub struct CompletionHandle<R> {
    rx: oneshot::Receiver<R>,
}

impl<R> CompletionHandle<R> {
    /// Wait for the outcome.
    ///
    /// # Errors
    ///
    /// `PoolError::Abandoned` if the notifier was dropped without completing.
    pub async fn wait(self) -> Result<R, PoolError> {
        self.rx.await.map_err(|_| PoolError::Abandoned)
    }

    /// Wait for the outcome, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// `PoolError::Timeout` when the deadline passes first, otherwise as
    /// [`wait`](Self::wait).
    pub async fn wait_timeout(self, timeout: Duration) -> Result<R, PoolError> {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(_)) => Err(PoolError::Abandoned),
            Err(_) => Err(PoolError::Timeout),
        }
    }

    /// Block the current thread until the outcome arrives.
    ///
    /// Must not be called from inside an async runtime.
    ///
    /// # Errors
    ///
    /// `PoolError::Abandoned` if the notifier was dropped without completing.
    pub fn wait_blocking(self) -> Result<R, PoolError> {
        self.rx.blocking_recv().map_err(|_| PoolError::Abandoned)
    }

    /// Non-blocking check. Returns `Ok(None)` while the job is still pending.
    ///
    /// # Errors
    ///
    /// `PoolError::Abandoned` if the notifier was dropped without completing.
    pub fn try_take(&mut self) -> Result<Option<R>, PoolError> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(oneshot::error::TryRecvError::Empty) => Ok(None),
            Err(oneshot::error::TryRecvError::Closed) => Err(PoolError::Abandoned),
        }
    }
}
