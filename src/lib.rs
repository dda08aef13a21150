//! ChordGuard — hardware button chord filter.
//!
//! Decides, inside the input-event callback, whether a key event may reach
//! the rest of the system or must be suppressed because it completes a
//! bootloader, recovery, or EDL button chord.
//!
//! Exposes the pure-logic core for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod clock;
pub mod config;
pub mod control;
pub mod error;
pub mod filter;
pub mod keys;
pub mod ports;
pub mod violations;

pub mod adapters;
pub mod drivers;

pub use control::ControlSurface;
pub use filter::{Detection, EventFilter, Verdict};
pub use keys::TrackedKey;
