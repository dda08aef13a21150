//! Detailed status report.
//!
//! Two renderings of the same [`FilterSnapshot`]: a human-readable block
//! for a diagnostics console, and JSON for the application-layer bridge.

use core::fmt::{self, Write};

use serde::Serialize;

use crate::filter::FilterSnapshot;

/// Status report built from one consistent snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusReport {
    pub version: &'static str,
    #[serde(flatten)]
    pub snapshot: FilterSnapshot,
}

impl StatusReport {
    pub fn new(snapshot: FilterSnapshot) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            snapshot,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Human-readable block, written into any `fmt::Write` target.
    pub fn render(&self, out: &mut impl Write) -> fmt::Result {
        let s = &self.snapshot;
        let pressed = |p: bool| if p { "PRESSED" } else { "Released" };

        writeln!(out, "ChordGuard v{}", self.version)?;
        writeln!(out, "==========================")?;
        writeln!(out)?;
        writeln!(out, "Status: {}", if s.enabled { "ENABLED" } else { "DISABLED" })?;
        writeln!(out, "Log Violations: {}", if s.log_violations { "YES" } else { "NO" })?;
        writeln!(out, "Combo Window: {} ms", s.window.combo_timeout_ms)?;
        writeln!(out)?;
        writeln!(out, "Button States:")?;
        writeln!(out, "  Power: {}", pressed(s.buttons.power))?;
        writeln!(out, "  Volume Up: {}", pressed(s.buttons.volume_up))?;
        writeln!(out, "  Volume Down: {}", pressed(s.buttons.volume_down))?;
        writeln!(out, "  Home: {}", pressed(s.buttons.home))?;
        writeln!(out)?;
        writeln!(out, "Violation Statistics:")?;
        writeln!(out, "  Total Blocked: {}", s.stats.blocked_total)?;
        writeln!(out, "  Recovery Attempts: {}", s.stats.recovery_attempts)?;
        writeln!(out, "  Fastboot Attempts: {}", s.stats.fastboot_attempts)?;
        writeln!(out, "  EDL Attempts: {}", s.stats.edl_attempts)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}
