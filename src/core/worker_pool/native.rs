//! Native implementation of `WorkerPool` using OS threads.
//!
//! Each worker owns a single-threaded tokio runtime so executors can await
//! file I/O without touching the caller's runtime.
//!
//! # Design Principles
//!
//! - **No polling**: workers block in `pop()`, callers await a oneshot
//! - **Non-blocking admission**: `try_push` under a shared read lock
//! - **Drain on shutdown**: dropping the producer lets workers finish the
//!   backlog, then `pop()` returns `None` and they exit

use std::any::Any;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::WorkerPoolConfig;
use crate::core::executor::WorkerExecutor;
use crate::core::job::{Job, JobMetadata};
use crate::core::notifier::{completion_channel, CompletionHandle, Notifier};
use crate::core::queue::{self, PushError, QueueConsumer, QueueProducer};

use super::{PoolCounters, PoolError, PoolStats};

/// Worker pool with dedicated OS threads and a bounded FIFO queue.
///
/// Construct once at process start and share by reference (or `Arc`); there
/// is no global state.
pub struct WorkerPool<P, R, E>
where
    P: Send + 'static,
    R: Send + 'static,
    E: WorkerExecutor<P, R>,
{
    /// Pool configuration.
    config: WorkerPoolConfig,

    /// Admission side of the queue. `None` once shut down.
    producer: RwLock<Option<QueueProducer<Job<P, R>>>>,

    /// Observer handle used only to report the backlog length.
    backlog: QueueConsumer<Job<P, R>>,

    /// Pool statistics counters.
    counters: Arc<PoolCounters>,

    /// Shutdown flag.
    shutdown: AtomicBool,

    /// Worker thread handles.
    workers: Mutex<Vec<JoinHandle<()>>>,

    /// Admission attempt counter.
    sequence: AtomicU64,

    _executor: PhantomData<E>,
}

impl<P, R, E> WorkerPool<P, R, E>
where
    P: Send + 'static,
    R: Send + 'static,
    E: WorkerExecutor<P, R>,
{
    /// Create the queue and start `config.worker_count` workers.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidConfig` if the configuration is invalid
    /// - `PoolError::Internal` if a worker runtime or thread cannot be created
    pub fn new(config: WorkerPoolConfig, executor: E) -> Result<Self, PoolError> {
        config.validate().map_err(PoolError::InvalidConfig)?;

        let (producer, consumer) = queue::bounded::<Job<P, R>>(config.max_queue_depth);
        let counters = Arc::new(PoolCounters::default());

        let mut workers = Vec::with_capacity(config.worker_count);
        for worker_id in 0..config.worker_count {
            let worker = spawn_worker(
                worker_id,
                consumer.clone(),
                Arc::clone(&counters),
                executor.clone(),
                config.thread_stack_size,
            );
            match worker {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    // Closing the producer lets the workers already started exit.
                    drop(producer);
                    return Err(e);
                }
            }
        }

        info!(
            worker_count = config.worker_count,
            max_queue_depth = config.max_queue_depth,
            "WorkerPool initialized"
        );

        Ok(Self {
            config,
            producer: RwLock::new(Some(producer)),
            backlog: consumer,
            counters,
            shutdown: AtomicBool::new(false),
            workers: Mutex::new(workers),
            sequence: AtomicU64::new(0),
            _executor: PhantomData,
        })
    }

    /// Admit a job, returning a handle to await its outcome.
    ///
    /// Never blocks.
    ///
    /// # Errors
    ///
    /// - `PoolError::QueueFull` if the queue is at capacity
    /// - `PoolError::PoolShutdown` if the pool has been shut down
    pub fn submit(&self, payload: P) -> Result<CompletionHandle<R>, PoolError> {
        let (notifier, handle) = completion_channel();
        self.submit_with_notifier(payload, notifier)?;
        Ok(handle)
    }

    /// Admit a job whose outcome goes to a caller-supplied notifier.
    ///
    /// On rejection the notifier is dropped unused; the returned error is the
    /// job's only outcome.
    ///
    /// # Errors
    ///
    /// - `PoolError::QueueFull` if the queue is at capacity
    /// - `PoolError::PoolShutdown` if the pool has been shut down
    pub fn submit_with_notifier(
        &self,
        payload: P,
        notifier: Notifier<R>,
    ) -> Result<JobMetadata, PoolError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(PoolError::PoolShutdown);
        }

        let producer = self.producer.read();
        let Some(producer) = producer.as_ref() else {
            return Err(PoolError::PoolShutdown);
        };

        let meta = JobMetadata::new(self.sequence.fetch_add(1, Ordering::Relaxed));
        let job = Job {
            payload,
            meta: meta.clone(),
            notifier,
        };

        match producer.try_push(job) {
            Ok(()) => {
                self.counters.submitted_jobs.fetch_add(1, Ordering::Relaxed);
                debug!(job_id = %meta.id, sequence = meta.sequence, "Job admitted");
                Ok(meta)
            }
            Err(PushError::Full(_)) => {
                self.counters.rejected_jobs.fetch_add(1, Ordering::Relaxed);
                warn!(
                    max_queue_depth = producer.capacity(),
                    "Work queue is full, rejecting job"
                );
                Err(PoolError::QueueFull)
            }
            Err(PushError::Closed(_)) => Err(PoolError::PoolShutdown),
        }
    }

    /// Get current pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(
            self.config.worker_count,
            self.config.max_queue_depth,
            self.backlog.len(),
        )
    }

    /// Jobs waiting in the queue.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.backlog.len()
    }

    /// Pool configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkerPoolConfig {
        &self.config
    }

    /// Whether `shutdown` has been called or the pool dropped.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Stop admission, let workers drain every accepted job, then join them.
    ///
    /// Blocks the calling thread. Each worker gets `shutdown_timeout_secs` to
    /// exit; one that does not is detached and keeps draining in the
    /// background.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }

        info!(queued_jobs = self.backlog.len(), "Shutting down worker pool, draining queue");

        // Workers see the end of the queue only after the backlog is empty.
        self.producer.write().take();

        let timeout = Duration::from_secs(self.config.shutdown_timeout_secs);
        let mut workers = self.workers.lock();
        let worker_count = workers.len();

        for (idx, worker) in workers.drain(..).enumerate() {
            let (tx, rx) = std::sync::mpsc::channel();
            let join_thread = thread::spawn(move || {
                let result = worker.join();
                let _ = tx.send(result.is_ok());
            });

            match rx.recv_timeout(timeout) {
                Ok(true) => {
                    debug!(worker_id = idx, "Worker joined successfully");
                    let _ = join_thread.join();
                }
                Ok(false) => {
                    warn!(worker_id = idx, "Worker panicked");
                    let _ = join_thread.join();
                }
                Err(_) => {
                    warn!(worker_id = idx, "Worker did not exit within timeout - detaching");
                }
            }
        }

        info!(worker_count = worker_count, "Worker pool shut down complete");
    }
}

impl<P, R, E> Drop for WorkerPool<P, R, E>
where
    P: Send + 'static,
    R: Send + 'static,
    E: WorkerExecutor<P, R>,
{
    fn drop(&mut self) {
        // Close admission but don't join; workers drain and exit on their own.
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            self.producer.write().take();
            debug!("WorkerPool dropped without explicit shutdown - workers will be detached");
        }
    }
}

/// Start a worker thread and wait until its runtime is up.
///
/// The runtime is built and dropped on the worker thread itself, never on the
/// caller's, which may be inside an async context.
fn spawn_worker<P, R, E>(
    worker_id: usize,
    consumer: QueueConsumer<Job<P, R>>,
    counters: Arc<PoolCounters>,
    executor: E,
    stack_size: usize,
) -> Result<JoinHandle<()>, PoolError>
where
    P: Send + 'static,
    R: Send + 'static,
    E: WorkerExecutor<P, R>,
{
    let (ready_tx, ready_rx) = std::sync::mpsc::sync_channel::<Result<(), String>>(1);

    let handle = thread::Builder::new()
        .name(format!("upload-worker-{worker_id}"))
        .stack_size(stack_size)
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            debug!(worker_id = worker_id, "Worker thread started");

            while let Some(job) = consumer.pop() {
                let Job {
                    payload,
                    meta,
                    notifier,
                } = job;
                let job_id = meta.id;

                counters.active_jobs.fetch_add(1, Ordering::Relaxed);
                debug!(
                    worker_id = worker_id,
                    job_id = %job_id,
                    sequence = meta.sequence,
                    "Worker executing job"
                );

                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    rt.block_on(executor.execute(payload, meta))
                }));

                counters.active_jobs.fetch_sub(1, Ordering::Relaxed);

                match result {
                    Ok(outcome) => {
                        // Count before waking the waiter so stats never lag the outcome.
                        counters.completed_jobs.fetch_add(1, Ordering::Relaxed);
                        notifier.complete(outcome);
                        debug!(worker_id = worker_id, job_id = %job_id, "Worker completed job");
                    }
                    Err(panic) => {
                        counters.abandoned_jobs.fetch_add(1, Ordering::Relaxed);
                        // Dropping the notifier resolves the waiter to `Abandoned`.
                        drop(notifier);
                        error!(
                            worker_id = worker_id,
                            job_id = %job_id,
                            panic = panic_message(panic.as_ref()),
                            "Executor panicked, job abandoned"
                        );
                    }
                }
            }

            debug!(worker_id = worker_id, "Work queue closed and drained, worker exiting");
        })
        .map_err(|e| PoolError::Internal(format!("failed to spawn worker {worker_id}: {e}")))?;

    match ready_rx.recv() {
        Ok(Ok(())) => Ok(handle),
        Ok(Err(e)) => {
            let _ = handle.join();
            Err(PoolError::Internal(format!("worker {worker_id} runtime: {e}")))
        }
        Err(_) => {
            let _ = handle.join();
            Err(PoolError::Internal(format!("worker {worker_id} exited during startup")))
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
