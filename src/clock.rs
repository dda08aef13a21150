//! Clock implementations.
//!
//! - [`MonotonicClock`] — the real time source. On ESP-IDF it reads the
//!   high-resolution `esp_timer` (monotonic across light sleep); on the host
//!   it uses `std::time::Instant`.
//! - [`ManualClock`] — an atomic, explicitly advanced clock for tests and
//!   simulations. Safe to share across threads.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::ports::{Clock, Millis};

/// Milliseconds since boot.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[cfg(target_os = "espidf")]
    fn now(&self) -> Millis {
        // SAFETY: esp_timer_get_time reads a hardware counter; it is ISR-safe
        // and has no preconditions.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        Millis(us.max(0) as u64 / 1000)
    }

    #[cfg(not(target_os = "espidf"))]
    fn now(&self) -> Millis {
        Millis(self.start.elapsed().as_millis() as u64)
    }
}

/// Clock whose value only changes when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    ms: AtomicU64,
}

impl ManualClock {
    pub const fn new(start_ms: u64) -> Self {
        Self {
            ms: AtomicU64::new(start_ms),
        }
    }

    /// Jump to an absolute time. Going backwards is allowed; the filter
    /// clamps it.
    pub fn set(&self, ms: u64) {
        self.ms.store(ms, Ordering::Release);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.ms.fetch_add(delta_ms, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.ms.load(Ordering::Acquire))
    }
}
