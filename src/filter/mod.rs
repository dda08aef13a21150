//! Event filter — the hot-path orchestrator.
//!
//! ```text
//!  RawKeyEvent ─▶ normalize ─▶ ┌──────────────── lock ────────────────┐
//!                              │ enabled? ─▶ ButtonState ─▶ Detector  │─▶ Verdict
//!                              │                 └─▶ Statistics       │
//!                              └──────────────────────────────────────┘
//!                                                  └─▶ ViolationSink (after unlock)
//! ```
//!
//! [`EventFilter`] runs inside the input callback, possibly in interrupt
//! context. Everything it touches is pre-allocated at construction and the
//! shared state sits behind an `embassy-sync` critical-section mutex, which
//! is safe to take from an ISR and is held for a bounded, constant number
//! of operations per event.
//!
//! Configuration and statistics are reached from outside the event path
//! through [`ControlSurface`](crate::control::ControlSurface), which takes
//! the same lock briefly.

pub mod detector;
pub mod state;
pub mod stats;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::warn;
use serde::Serialize;

use crate::config::{ChordWindow, FilterConfig};
use crate::control::ControlSurface;
use crate::keys::{self, KeyInput, RawKeyEvent, TrackedKey};
use crate::ports::{Clock, Millis, ViolationSink};
use crate::violations::ViolationRecord;

pub use detector::{ChordDetector, Detection};
pub use state::{ButtonState, PressedKeys};
pub use stats::{Statistics, StatsSnapshot};

/// The filter's decision for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Deliver the event to the rest of the system.
    Allow,
    /// Suppress the event; it completes a dangerous chord.
    Block,
}

impl Verdict {
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// Everything guarded by the filter lock.
#[derive(Debug)]
pub(crate) struct SharedState {
    pub(crate) enabled: bool,
    pub(crate) log_violations: bool,
    pub(crate) buttons: ButtonState,
    pub(crate) stats: Statistics,
    /// Latest timestamp seen, so a backwards clock never shrinks time.
    last_now: Millis,
}

impl SharedState {
    const fn new(config: &FilterConfig) -> Self {
        Self {
            enabled: config.enabled,
            log_violations: config.log_violations,
            buttons: ButtonState::new(),
            stats: Statistics::new(),
            last_now: Millis::ZERO,
        }
    }

    fn monotonic(&mut self, now: Millis) -> Millis {
        if now > self.last_now {
            self.last_now = now;
        }
        self.last_now
    }
}

/// Consistent view of configuration, key state, and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSnapshot {
    pub enabled: bool,
    pub log_violations: bool,
    pub window: ChordWindow,
    pub buttons: PressedKeys,
    pub stats: StatsSnapshot,
}

/// The chord filter. One instance per device; share it by reference
/// between the event source and the control surface.
pub struct EventFilter<C, S> {
    shared: Mutex<CriticalSectionRawMutex, RefCell<SharedState>>,
    detector: ChordDetector,
    clock: C,
    sink: S,
}

impl<C: Clock, S: ViolationSink> EventFilter<C, S> {
    /// Build a filter. An out-of-range window falls back to the default.
    pub fn new(config: FilterConfig, clock: C, sink: S) -> Self {
        let window = match config.window.validate() {
            Ok(()) => config.window,
            Err(e) => {
                warn!("chordguard: {e}; using default chord window");
                ChordWindow::default()
            }
        };
        Self {
            shared: Mutex::new(RefCell::new(SharedState::new(&config))),
            detector: ChordDetector::new(window),
            clock,
            sink,
        }
    }

    /// Filter a normalised key transition, timestamped by the filter's clock.
    pub fn filter_event(&self, key: TrackedKey, is_pressed: bool) -> Verdict {
        self.filter_event_at(key, is_pressed, self.clock.now())
    }

    /// Filter a transition whose timestamp the event source already knows.
    pub fn filter_event_at(&self, key: TrackedKey, is_pressed: bool, now: Millis) -> Verdict {
        let code = canonical_code(key);
        self.process(key, is_pressed, now, code, i32::from(is_pressed))
    }

    /// Filter a raw input event. Non-key events and untracked codes are
    /// allowed without touching any state.
    pub fn filter_raw(&self, event: RawKeyEvent) -> Verdict {
        match keys::normalize(event) {
            KeyInput::Tracked { key, pressed } => {
                self.process(key, pressed, self.clock.now(), event.code, event.value)
            }
            KeyInput::Untracked => Verdict::Allow,
        }
    }

    /// Configuration and statistics access for ordinary (non-event) context.
    pub fn control(&self) -> ControlSurface<'_, C, S> {
        ControlSurface::new(self)
    }

    pub fn window(&self) -> ChordWindow {
        self.detector.window()
    }

    /// Run `f` with exclusive access to the shared state.
    pub(crate) fn with_shared<R>(&self, f: impl FnOnce(&mut SharedState) -> R) -> R {
        self.shared.lock(|cell| f(&mut cell.borrow_mut()))
    }

    fn process(&self, key: TrackedKey, is_pressed: bool, now: Millis, code: u16, value: i32) -> Verdict {
        let outcome = self.with_shared(|s| {
            if !s.enabled {
                return None;
            }
            let now = s.monotonic(now);
            s.buttons.on_transition(key, is_pressed, now);

            let detection = self.detector.evaluate(&s.buttons, now);
            if !detection.is_violation() {
                return None;
            }
            s.stats.record(detection);
            Some((detection, now, s.log_violations))
        });

        let Some((category, timestamp, log_violations)) = outcome else {
            return Verdict::Allow;
        };

        if log_violations {
            // A full sink is counted by the sink itself; the block stands.
            let _ = self.sink.offer(ViolationRecord {
                category,
                key,
                code,
                value,
                timestamp,
            });
        }
        Verdict::Block
    }
}

/// Primary key code reported for events that arrive already normalised.
const fn canonical_code(key: TrackedKey) -> u16 {
    match key {
        TrackedKey::Power => keys::KEY_POWER,
        TrackedKey::VolumeUp => keys::KEY_VOLUMEUP,
        TrackedKey::VolumeDown => keys::KEY_VOLUMEDOWN,
        TrackedKey::Home => keys::KEY_HOME,
    }
}
