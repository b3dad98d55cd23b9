//! Fixed-capacity event queue.
//!
//! A circular FIFO over a boxed slice with explicit occupancy bookkeeping:
//! write index, read index, count. Capacity is fixed at construction and the
//! queue never reallocates, matching the no-allocation budget of the
//! badge-class hardware the game targets.
//!
//! # Overflow and underflow
//!
//! The failure policy is chosen at construction:
//!
//! - [`OverflowPolicy::Checked`] (the default): `enqueue` past capacity and
//!   `dequeue` past empty return a [`QueueError`] and leave the queue
//!   untouched.
//! - [`OverflowPolicy::Unchecked`]: the cursor arithmetic proceeds regardless
//!   and no error is ever returned. Overflow overwrites the oldest unconsumed
//!   slot; underflow walks the read cursor over vacant slots and hands back a
//!   zero exposure. Once a precondition has been violated, queue content and
//!   FIFO order are unspecified (memory safety is never at stake, the queue's
//!   meaning is). Intended only for deployments that have proven their
//!   capacity bound ahead of time; never select it by default.
//!
//! # Concurrency
//!
//! Single producer, single consumer, no internal synchronization. If the
//! producer and consumer live on different threads the caller must supply
//! external mutual exclusion; the queue promises no atomicity of its own.

use thiserror::Error;

use outbreak_logic::progression::Exposure;

use crate::events::Event;

/// Failure policy for enqueue past capacity and dequeue past empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Reject the operation with a [`QueueError`], leaving state untouched.
    Checked,
    /// Perform the cursor arithmetic regardless; see the module docs before
    /// choosing this.
    Unchecked,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        Self::Checked
    }
}

/// Errors returned by a checked-policy queue.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// `enqueue` was called with the count already at capacity. The event
    /// was not stored; the caller decides whether to back off or drop it.
    #[error("event queue full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    /// `dequeue` was called with nothing present. Usually a caller logic
    /// error: check `is_empty` or respect the source's `None` sentinel.
    #[error("event queue empty")]
    Empty,
}

/// Fixed-capacity circular event FIFO.
#[derive(Debug, Clone)]
pub struct EventQueue {
    slots: Box<[Option<Event>]>,
    read: usize,
    write: usize,
    len: usize,
    policy: OverflowPolicy,
}

impl EventQueue {
    /// Create a queue with a capacity fixed for its lifetime.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        assert!(capacity > 0, "event queue capacity must be > 0");
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            read: 0,
            write: 0,
            len: 0,
            policy,
        }
    }

    /// Checked-policy queue (the safe default).
    pub fn checked(capacity: usize) -> Self {
        Self::new(capacity, OverflowPolicy::Checked)
    }

    /// Unchecked-policy queue. Read the module docs first.
    pub fn unchecked(capacity: usize) -> Self {
        Self::new(capacity, OverflowPolicy::Unchecked)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Store an event at the write cursor and advance it.
    ///
    /// At capacity, checked policy rejects with
    /// [`QueueError::CapacityExceeded`]; unchecked policy overwrites the
    /// oldest unconsumed slot and leaves the count saturated.
    pub fn enqueue(&mut self, event: Event) -> Result<(), QueueError> {
        if self.len == self.capacity() {
            if self.policy == OverflowPolicy::Checked {
                return Err(QueueError::CapacityExceeded {
                    capacity: self.capacity(),
                });
            }
            // Unchecked: clobber in place, count stays saturated.
        } else {
            self.len += 1;
        }
        self.slots[self.write] = Some(event);
        self.write = self.advance(self.write);
        Ok(())
    }

    /// Move the oldest event out of its slot and advance the read cursor.
    ///
    /// When empty, checked policy rejects with [`QueueError::Empty`];
    /// unchecked policy walks the cursor anyway and fabricates a zero
    /// exposure for any vacant slot it lands on.
    pub fn dequeue(&mut self) -> Result<Event, QueueError> {
        if self.is_empty() && self.policy == OverflowPolicy::Checked {
            return Err(QueueError::Empty);
        }
        // A vacant slot is only reachable after an unchecked-policy
        // violation; the zero exposure stands in for the unspecified value.
        let event = self.slots[self.read]
            .take()
            .unwrap_or(Event::Exposure(Exposure::default()));
        self.read = self.advance(self.read);
        self.len = self.len.saturating_sub(1);
        Ok(event)
    }

    /// Drop every queued event and reset the cursors.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.read = 0;
        self.write = 0;
        self.len = 0;
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }
}
