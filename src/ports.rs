//! Port traits — the boundary between the filter core and its collaborators.
//!
//! ```text
//!   Clock ──▶ ┌─────────────┐ ──▶ ViolationSink ──▶ log / telemetry
//!             │ EventFilter │
//!   events ──▶└─────────────┘ ◀── ControlSurface ◀── StoragePort
//! ```
//!
//! The clock and violation sink are called from the event path and must
//! therefore be non-blocking and non-allocating. The storage port is only
//! used from ordinary context.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::violations::ViolationRecord;

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic timestamp in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub const fn saturating_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

/// Time source for all chord timing decisions.
///
/// Implementations must be callable from interrupt context: no locks,
/// no allocation.
pub trait Clock {
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

// ───────────────────────────────────────────────────────────────
// Violation sink
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget receiver for detected chords.
///
/// `offer` runs on the event path: it must never block. Returning `false`
/// means the record was dropped.
pub trait ViolationSink {
    fn offer(&self, record: ViolationRecord) -> bool;
}

impl<S: ViolationSink + ?Sized> ViolationSink for &S {
    fn offer(&self, record: ViolationRecord) -> bool {
        (**self).offer(record)
    }
}

/// Sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardViolations;

impl ViolationSink for DiscardViolations {
    fn offer(&self, _record: ViolationRecord) -> bool {
        false
    }
}

// ───────────────────────────────────────────────────────────────
// Storage port
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage (NVS partition or in-memory).
///
/// Keys are namespaced to prevent collisions between subsystems.
/// Writes must be atomic — no partial values after power loss.
pub trait StoragePort {
    /// Read a value. Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key. Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}
