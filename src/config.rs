//! Filter configuration.
//!
//! Runtime toggles (`enabled`, `log_violations`) are changed through the
//! control surface; the chord windows are fixed at construction.
//! Defaults match the boot state of the kernel filter this replaces:
//! disabled until the device owner turns it on, violations logged.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default window within which Power and a volume key must both have been
/// pressed for the pair to count as a chord.
pub const COMBO_TIMEOUT_MS: u64 = 2000;

/// Reserved for press-duration chords (e.g. Power + Home long press).
pub const LONG_PRESS_MS: u64 = 3000;

/// Timing constants for chord detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordWindow {
    pub combo_timeout_ms: u64,
    pub long_press_ms: u64,
}

impl Default for ChordWindow {
    fn default() -> Self {
        Self {
            combo_timeout_ms: COMBO_TIMEOUT_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

impl ChordWindow {
    /// Range-check the window. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(100..=10_000).contains(&self.combo_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "combo_timeout_ms must be 100–10000",
            ));
        }
        if self.long_press_ms < self.combo_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "long_press_ms must be >= combo_timeout_ms",
            ));
        }
        Ok(())
    }
}

/// Complete filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Master switch. When false the filter is transparent.
    pub enabled: bool,
    /// Report detections to the violation sink.
    pub log_violations: bool,
    pub window: ChordWindow,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_violations: true,
            window: ChordWindow::default(),
        }
    }
}
