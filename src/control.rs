//! Control surface — configuration and statistics access from ordinary
//! context.
//!
//! Every operation takes the filter lock once, so a write is visible to the
//! very next event and a read never observes a half-applied update. Only
//! typed values cross this boundary; rendering them as text is the job of
//! [`AttributeTable`](crate::adapters::attributes::AttributeTable).
//!
//! | Operation            | Effect                                          |
//! |----------------------|-------------------------------------------------|
//! | `enabled` / `set_enabled` | master switch                              |
//! | `log_violations` / `set_log_violations` | violation reporting toggle    |
//! | `stats`              | consistent counter snapshot                     |
//! | `reset_stats`        | zero counters **and** release all tracked keys  |

use log::info;

use crate::filter::{EventFilter, FilterSnapshot, StatsSnapshot};
use crate::ports::{Clock, ViolationSink};

/// Borrowed handle onto a filter's shared state.
pub struct ControlSurface<'a, C, S> {
    filter: &'a EventFilter<C, S>,
}

impl<C, S> Clone for ControlSurface<'_, C, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, S> Copy for ControlSurface<'_, C, S> {}

impl<'a, C: Clock, S: ViolationSink> ControlSurface<'a, C, S> {
    pub fn new(filter: &'a EventFilter<C, S>) -> Self {
        Self { filter }
    }

    pub fn enabled(&self) -> bool {
        self.filter.with_shared(|s| s.enabled)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.filter.with_shared(|s| s.enabled = enabled);
        info!(
            "chordguard: filter {}",
            if enabled { "ENABLED" } else { "DISABLED" }
        );
    }

    pub fn log_violations(&self) -> bool {
        self.filter.with_shared(|s| s.log_violations)
    }

    pub fn set_log_violations(&self, log_violations: bool) {
        self.filter.with_shared(|s| s.log_violations = log_violations);
        info!(
            "chordguard: violation logging {}",
            if log_violations { "on" } else { "off" }
        );
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.filter.with_shared(|s| s.stats.snapshot())
    }

    /// Zero all counters and forget every pressed key, atomically.
    pub fn reset_stats(&self) {
        self.filter.with_shared(|s| {
            s.stats.reset();
            s.buttons.clear();
        });
        info!("chordguard: statistics reset");
    }

    /// Toggles, key state, and counters captured under one lock.
    pub fn snapshot(&self) -> FilterSnapshot {
        let window = self.filter.window();
        self.filter.with_shared(|s| FilterSnapshot {
            enabled: s.enabled,
            log_violations: s.log_violations,
            window,
            buttons: s.buttons.pressed_flags(),
            stats: s.stats.snapshot(),
        })
    }
}
