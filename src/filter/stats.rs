//! Violation counters.
//!
//! Counters only grow; the one exception is [`Statistics::reset`], invoked
//! through the control surface. They live inside the filter lock, so a
//! [`StatsSnapshot`] is always a consistent point-in-time copy.

use serde::{Deserialize, Serialize};

use super::detector::Detection;

/// Live counters owned by the event filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    blocked_total: u64,
    recovery_attempts: u64,
    fastboot_attempts: u64,
    edl_attempts: u64,
}

impl Statistics {
    pub const fn new() -> Self {
        Self {
            blocked_total: 0,
            recovery_attempts: 0,
            fastboot_attempts: 0,
            edl_attempts: 0,
        }
    }

    /// Count one blocked event in `detection`'s category.
    pub fn record(&mut self, detection: Detection) {
        let category = match detection {
            Detection::None => return,
            Detection::Recovery => &mut self.recovery_attempts,
            Detection::Fastboot => &mut self.fastboot_attempts,
            Detection::Edl => &mut self.edl_attempts,
        };
        *category = category.saturating_add(1);
        self.blocked_total = self.blocked_total.saturating_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            blocked_total: self.blocked_total,
            recovery_attempts: self.recovery_attempts,
            fastboot_attempts: self.fastboot_attempts,
            edl_attempts: self.edl_attempts,
        }
    }
}

/// Point-in-time copy of the counters, handed out to the control surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub blocked_total: u64,
    pub recovery_attempts: u64,
    pub fastboot_attempts: u64,
    pub edl_attempts: u64,
}

impl StatsSnapshot {
    /// Category counters add up to the total.
    pub fn is_consistent(&self) -> bool {
        self.recovery_attempts
            .checked_add(self.fastboot_attempts)
            .and_then(|n| n.checked_add(self.edl_attempts))
            == Some(self.blocked_total)
    }
}
