//! Serial console front-end for the control surface.
//!
//! One command per line:
//!
//! ```text
//! show <attribute>            → attribute text
//! store <attribute> <value>   → "ok" or an error
//! status                      → detailed status block
//! json                        → status as JSON
//! ```

use core::fmt::Write;

use crate::adapters::attributes::AttributeTable;
use crate::adapters::status::StatusReport;
use crate::control::ControlSurface;
use crate::error::ControlError;
use crate::ports::{Clock, ViolationSink};

/// A parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand<'a> {
    Show(&'a str),
    Store(&'a str, &'a str),
    Status,
    Json,
}

impl<'a> ConsoleCommand<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();
        match verb {
            "show" if !rest.is_empty() => Some(Self::Show(rest)),
            "store" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                (!name.is_empty()).then_some(Self::Store(name, value.trim_start()))
            }
            "status" => Some(Self::Status),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// True if running the command may change persisted settings.
    pub fn mutates_settings(&self) -> bool {
        matches!(self, Self::Store("enabled" | "log_violations", _))
    }
}

/// Execute `cmd` and return the reply text.
pub fn execute<C: Clock, S: ViolationSink>(
    cmd: ConsoleCommand<'_>,
    surface: ControlSurface<'_, C, S>,
) -> String {
    let attrs = AttributeTable::new(surface);
    match cmd {
        ConsoleCommand::Show(name) => match attrs.show(name) {
            Ok(text) => text.as_str().to_owned(),
            Err(e) => error_reply(e),
        },
        ConsoleCommand::Store(name, value) => match attrs.store(name, value) {
            Ok(()) => "ok\n".to_owned(),
            Err(e) => error_reply(e),
        },
        ConsoleCommand::Status => StatusReport::new(surface.snapshot()).to_string(),
        ConsoleCommand::Json => match StatusReport::new(surface.snapshot()).to_json() {
            Ok(mut json) => {
                json.push('\n');
                json
            }
            Err(e) => format!("error: {e}\n"),
        },
    }
}

fn error_reply(e: ControlError) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "error: {e}");
    out
}
