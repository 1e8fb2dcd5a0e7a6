//! Bounded FIFO work queue shared by the admission gate and the workers.
//!
//! The queue is a single crossbeam channel split into a producer half and a
//! consumer half. Producers never block: [`QueueProducer::try_push`] either
//! inserts or hands the item straight back. Consumers block in
//! [`QueueConsumer::pop`] until an item arrives or every producer is gone and
//! the queue has drained.

use crossbeam_channel::{bounded as channel, Receiver, Sender, TrySendError};

/// Why a non-blocking push did not insert the item. The item is returned.
#[derive(Debug, PartialEq, Eq)]
pub enum PushError<T> {
    /// Queue is at capacity.
    Full(T),
    /// Every consumer has been dropped.
    Closed(T),
}

impl<T> PushError<T> {
    /// Recover the item that was not enqueued.
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(item) | Self::Closed(item) => item,
        }
    }
}

/// Create a bounded queue holding at most `capacity` items.
///
/// `capacity` must be non-zero; a zero-capacity channel never buffers.
#[must_use]
pub fn bounded<T>(capacity: usize) -> (QueueProducer<T>, QueueConsumer<T>) {
    let (tx, rx) = channel(capacity);
    (
        QueueProducer { tx, capacity },
        QueueConsumer { rx },
    )
}

/// Sending half. Cloning adds another producer.
#[derive(Debug)]
pub struct QueueProducer<T> {
    tx: Sender<T>,
    capacity: usize,
}

impl<T> Clone for QueueProducer<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T> QueueProducer<T> {
    /// Insert without waiting.
    ///
    /// # Errors
    ///
    /// Returns the item inside [`PushError::Full`] when the queue holds
    /// `capacity` items, or [`PushError::Closed`] when no consumer remains.
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        self.tx.try_send(item).map_err(|e| match e {
            TrySendError::Full(item) => PushError::Full(item),
            TrySendError::Disconnected(item) => PushError::Closed(item),
        })
    }

    /// Items currently waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    /// Whether no items are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }

    /// Whether the next push would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tx.is_full()
    }

    /// Fixed capacity of the queue.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Receiving half. Cloning adds another consumer; each item goes to exactly one.
#[derive(Debug)]
pub struct QueueConsumer<T> {
    rx: Receiver<T>,
}

impl<T> Clone for QueueConsumer<T> {
    fn clone(&self) -> Self {
        Self { rx: self.rx.clone() }
    }
}

impl<T> QueueConsumer<T> {
    /// Block until an item is available.
    ///
    /// Returns `None` once all producers are dropped and the queue is empty,
    /// so buffered items are always delivered before the consumer sees the
    /// end of the stream.
    #[must_use]
    pub fn pop(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Items currently waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no items are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
