//! Fixed-capacity FIFO monitor shared by one producer and several workers
//!
//! The queue is a circular buffer guarded by a single mutex with two
//! condition variables: producers wait on `not_full`, consumers wait on
//! `not_empty`. Every waiter re-checks its predicate after waking, so
//! spurious wake-ups are harmless.
//!
//! The insertion and retrieval indices coincide both when the buffer is
//! empty and when it is full; the occupancy counter is the only thing that
//! tells the two apart.
//!
//! Termination is signalled in-band: the producer calls [`BoundedQueue::end`]
//! once per worker, and each worker stops after taking exactly one
//! [`QueueItem::End`].

use crate::error::{EngineError, Result};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// An entry in the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem<T> {
    /// A unit of work
    Work(T),
    /// Terminal marker; the consumer that takes it must stop
    End,
}

/// Occupancy-derived queue state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// No items; consumers block
    Empty,
    /// Some items; both sides proceed
    Partial,
    /// At capacity; producers block
    Full,
}

#[derive(Debug)]
struct Slots<T> {
    buf: Vec<Option<QueueItem<T>>>,
    insert_at: usize,
    retrieve_at: usize,
    occupancy: usize,
    aborted: bool,
}

/// Bounded blocking FIFO
#[derive(Debug)]
pub struct BoundedQueue<T> {
    slots: Mutex<Slots<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue with `capacity` slots
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(EngineError::Config(
                "queue capacity must be greater than 0".into(),
            ));
        }

        Ok(Self {
            slots: Mutex::new(Slots {
                buf: (0..capacity).map(|_| None).collect(),
                insert_at: 0,
                retrieve_at: 0,
                occupancy: 0,
                aborted: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    /// Enqueue a work item, blocking while the queue is full
    pub fn put(&self, item: T) -> Result<()> {
        self.push(QueueItem::Work(item))
    }

    /// Enqueue one terminal marker, blocking while the queue is full
    pub fn end(&self) -> Result<()> {
        self.push(QueueItem::End)
    }

    fn push(&self, item: QueueItem<T>) -> Result<()> {
        let mut slots = self.slots.lock()?;
        while slots.occupancy == self.capacity && !slots.aborted {
            slots = self.not_full.wait(slots)?;
        }
        if slots.aborted {
            return Err(EngineError::Aborted);
        }

        let at = slots.insert_at;
        slots.buf[at] = Some(item);
        slots.insert_at = (at + 1) % self.capacity;
        slots.occupancy += 1;
        drop(slots);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Dequeue the oldest item, blocking while the queue is empty
    pub fn get(&self) -> Result<QueueItem<T>> {
        let mut slots = self.slots.lock()?;
        while slots.occupancy == 0 && !slots.aborted {
            slots = self.not_empty.wait(slots)?;
        }
        if slots.aborted {
            return Err(EngineError::Aborted);
        }

        let at = slots.retrieve_at;
        let Some(item) = slots.buf[at].take() else {
            return Err(EngineError::SyncPrimitive(format!(
                "queue slot {at} empty with occupancy {}",
                slots.occupancy
            )));
        };
        slots.retrieve_at = (at + 1) % self.capacity;
        slots.occupancy -= 1;
        drop(slots);

        self.not_full.notify_one();
        Ok(item)
    }

    /// Mark the queue as failed and wake every waiter
    ///
    /// All later operations fail with [`EngineError::Aborted`].
    pub fn abort(&self) {
        let mut slots = self.lock_ignoring_poison();
        slots.aborted = true;
        drop(slots);

        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Whether [`BoundedQueue::abort`] has been called
    pub fn is_aborted(&self) -> bool {
        self.lock_ignoring_poison().aborted
    }

    /// Number of queued items, terminal markers included
    pub fn len(&self) -> Result<usize> {
        Ok(self.slots.lock()?.occupancy)
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Current state, derived from occupancy alone
    pub fn state(&self) -> Result<QueueState> {
        let occupancy = self.len()?;
        Ok(if occupancy == 0 {
            QueueState::Empty
        } else if occupancy == self.capacity {
            QueueState::Full
        } else {
            QueueState::Partial
        })
    }

    /// Slot count
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock_ignoring_poison(&self) -> MutexGuard<'_, Slots<T>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
