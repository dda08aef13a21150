//! Log-based violation sink.
//!
//! Drains the [`ViolationQueue`] from the main loop and writes one warning
//! per record to the logger (UART / USB-CDC on device). Output is
//! rate-limited with a token bucket so a user mashing buttons cannot flood
//! the console; suppressed lines are summarised on the next drain.

use burster::Limiter;
use core::time::Duration;
use log::warn;

use crate::violations::{ViolationQueue, ViolationRecord};

/// Adapter that logs every drained [`ViolationRecord`].
pub struct LogViolationSink {
    limiter: burster::TokenBucket<fn() -> Duration>,
    suppressed: u32,
    logged: u64,
}

impl Default for LogViolationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViolationSink {
    pub fn new() -> Self {
        Self::with_time_provider(platform_now)
    }

    pub fn with_time_provider(now: fn() -> Duration) -> Self {
        Self {
            limiter: burster::TokenBucket::new_with_time_provider(
                10,
                10, // 10 lines per second, 10 burst capacity
                now,
            ),
            suppressed: 0,
            logged: 0,
        }
    }

    /// Drain the queue. Returns the number of records consumed.
    pub fn drain(&mut self, queue: &ViolationQueue) -> usize {
        let mut consumed = 0;
        queue.drain(|record| {
            consumed += 1;
            self.emit(&record);
        });

        let dropped = queue.take_dropped();
        if dropped > 0 {
            warn!("chordguard: {dropped} violation record(s) lost, queue full");
        }
        if self.suppressed > 0 && self.limiter.try_consume(1).is_ok() {
            warn!("chordguard: {} violation line(s) suppressed", self.suppressed);
            self.suppressed = 0;
        }
        consumed
    }

    /// Write a single record, subject to the rate limit.
    pub fn emit(&mut self, record: &ViolationRecord) {
        if self.limiter.try_consume(1).is_err() {
            self.suppressed = self.suppressed.saturating_add(1);
            return;
        }
        self.logged += 1;
        warn!(
            "chordguard: BLOCKED {} | key={} code={} value={} t={}ms",
            record.category.label(),
            record.key.label(),
            record.code,
            record.value,
            record.timestamp.as_millis(),
        );
    }

    /// Lines actually written.
    pub fn logged(&self) -> u64 {
        self.logged
    }

    /// Lines withheld by the rate limiter and not yet summarised.
    pub fn suppressed(&self) -> u32 {
        self.suppressed
    }
}

#[cfg(target_os = "espidf")]
fn platform_now() -> Duration {
    // SAFETY: esp_timer_get_time reads a hardware counter with no preconditions.
    let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
    Duration::from_micros(us.max(0) as u64)
}

#[cfg(not(target_os = "espidf"))]
fn platform_now() -> Duration {
    use std::time::Instant;
    static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    START.get_or_init(Instant::now).elapsed()
}
