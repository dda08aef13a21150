//! Violation records and the deferred hand-off queue.
//!
//! The event path cannot log: it may run in interrupt context. Instead it
//! pushes a `Copy` record into a bounded `embassy-sync` channel with
//! `try_send`. A full queue drops the record and bumps a counter. The
//! [`LogViolationSink`](crate::adapters::log_sink::LogViolationSink) drains
//! the queue from ordinary context.
//!
//! ```text
//! ┌──────────────┐  try_send  ┌────────────────┐  try_receive  ┌──────────────┐
//! │ EventFilter  │───────────▶│ ViolationQueue │──────────────▶│ log sink     │
//! │ (ISR / cb)   │            │ (bounded, 32)  │               │ (main loop)  │
//! └──────────────┘            └────────────────┘               └──────────────┘
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use serde::Serialize;

use crate::filter::Detection;
use crate::keys::TrackedKey;
use crate::ports::{Millis, ViolationSink};

/// Queue depth for pending violation records.
pub const VIOLATION_QUEUE_DEPTH: usize = 32;

/// One detected chord, as reported to the logging collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViolationRecord {
    pub category: Detection,
    /// Key whose event completed the chord.
    pub key: TrackedKey,
    /// Raw key code of that event.
    pub code: u16,
    /// Raw event value (1 press, 2 autorepeat).
    pub value: i32,
    pub timestamp: Millis,
}

/// Bounded, lock-free-to-the-caller queue of violation records.
pub struct ViolationQueue {
    channel: Channel<CriticalSectionRawMutex, ViolationRecord, VIOLATION_QUEUE_DEPTH>,
    dropped: AtomicU32,
}

impl Default for ViolationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ViolationQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Take the oldest pending record, if any.
    pub fn pop(&self) -> Option<ViolationRecord> {
        self.channel.try_receive().ok()
    }

    /// Drain every pending record into `handler`, oldest first.
    pub fn drain(&self, mut handler: impl FnMut(ViolationRecord)) {
        while let Some(record) = self.pop() {
            handler(record);
        }
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Records lost because the queue was full. Reading resets the count.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::AcqRel)
    }
}

impl ViolationSink for ViolationQueue {
    fn offer(&self, record: ViolationRecord) -> bool {
        if self.channel.try_send(record).is_ok() {
            true
        } else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }
}
