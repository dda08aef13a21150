//! Text attribute surface (sysfs-style).
//!
//! Maps named attributes onto [`ControlSurface`] operations and does the
//! string formatting the core deliberately leaves out:
//!
//! | Attribute        | Mode | Show                      | Store            |
//! |------------------|------|---------------------------|------------------|
//! | `enabled`        | rw   | `"0\n"` / `"1\n"`         | boolean text     |
//! | `stats`          | ro   | one `Key: Value` per line | —                |
//! | `reset_stats`    | wo   | —                         | any text         |
//! | `log_violations` | rw   | `"0\n"` / `"1\n"`         | boolean text     |

use core::fmt::Write;

use crate::control::ControlSurface;
use crate::error::ControlError;
use crate::filter::StatsSnapshot;
use crate::ports::{Clock, ViolationSink};

/// Capacity of a rendered attribute value.
pub const ATTR_TEXT_CAP: usize = 192;

pub type AttrText = heapless::String<ATTR_TEXT_CAP>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Enabled,
    Stats,
    ResetStats,
    LogViolations,
}

impl Attribute {
    pub const ALL: [Self; 4] = [Self::Enabled, Self::Stats, Self::ResetStats, Self::LogViolations];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "enabled" => Some(Self::Enabled),
            "stats" => Some(Self::Stats),
            "reset_stats" => Some(Self::ResetStats),
            "log_violations" => Some(Self::LogViolations),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Stats => "stats",
            Self::ResetStats => "reset_stats",
            Self::LogViolations => "log_violations",
        }
    }

    /// Unix permission bits the attribute is published with.
    pub const fn mode(self) -> u16 {
        match self {
            Self::Enabled | Self::LogViolations => 0o644,
            Self::Stats => 0o444,
            Self::ResetStats => 0o200,
        }
    }
}

/// Parse a boolean the way the kernel's `strtobool` does: only the first
/// character matters, except for `on` / `off`.
pub fn parse_bool(text: &str) -> Result<bool, ControlError> {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b'y' | b'Y' | b'1') => Ok(true),
        Some(b'n' | b'N' | b'0') => Ok(false),
        Some(b'o' | b'O') => match bytes.get(1) {
            Some(b'n' | b'N') => Ok(true),
            Some(b'f' | b'F') => Ok(false),
            _ => Err(ControlError::InvalidBoolean),
        },
        _ => Err(ControlError::InvalidBoolean),
    }
}

/// Render a toggle as `"0\n"` or `"1\n"`.
pub fn format_bool(value: bool) -> AttrText {
    let mut out = AttrText::new();
    let _ = out.push_str(if value { "1\n" } else { "0\n" });
    out
}

/// Render counters as one `Key: Value` line each.
pub fn format_stats(stats: &StatsSnapshot) -> AttrText {
    let mut out = AttrText::new();
    let _ = write!(
        out,
        "Total Blocked: {}\nRecovery Attempts: {}\nFastboot Attempts: {}\nEDL Attempts: {}\n",
        stats.blocked_total, stats.recovery_attempts, stats.fastboot_attempts, stats.edl_attempts,
    );
    out
}

/// Named read/write access to a filter's control surface.
pub struct AttributeTable<'a, C, S> {
    surface: ControlSurface<'a, C, S>,
}

impl<'a, C: Clock, S: ViolationSink> AttributeTable<'a, C, S> {
    pub fn new(surface: ControlSurface<'a, C, S>) -> Self {
        Self { surface }
    }

    pub fn show(&self, name: &str) -> Result<AttrText, ControlError> {
        match Attribute::from_name(name).ok_or(ControlError::UnknownAttribute)? {
            Attribute::Enabled => Ok(format_bool(self.surface.enabled())),
            Attribute::LogViolations => Ok(format_bool(self.surface.log_violations())),
            Attribute::Stats => Ok(format_stats(&self.surface.stats())),
            Attribute::ResetStats => Err(ControlError::NotReadable),
        }
    }

    /// Apply a write. On error nothing changes.
    pub fn store(&self, name: &str, text: &str) -> Result<(), ControlError> {
        match Attribute::from_name(name).ok_or(ControlError::UnknownAttribute)? {
            Attribute::Enabled => self.surface.set_enabled(parse_bool(text)?),
            Attribute::LogViolations => self.surface.set_log_violations(parse_bool(text)?),
            Attribute::ResetStats => self.surface.reset_stats(),
            Attribute::Stats => return Err(ControlError::NotWritable),
        }
        Ok(())
    }
}
