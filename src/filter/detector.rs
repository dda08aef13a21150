//! Chord detector — pure decision function over [`ButtonState`].
//!
//! Power is the anchor of every dangerous chord: nothing matches unless it
//! is held. Checks run in a fixed order and the first match wins:
//!
//! | Order | Chord                  | Condition                                        |
//! |-------|------------------------|--------------------------------------------------|
//! | 1     | Recovery               | VolUp held, VolUp and Power both pressed < window ago |
//! | 2     | Fastboot / Download    | VolDown held, VolDown and Power pressed < window ago  |
//! | 3     | EDL                    | VolUp and VolDown held, Power pressed < window ago    |
//!
//! EDL ignores the individual volume-key press times; only Power's
//! hold duration bounds it. Because Recovery and Fastboot are checked
//! first, a three-key chord normally registers as one of those, and EDL
//! only fires once both volume keys have been held past the window.

use serde::Serialize;

use super::state::ButtonState;
use crate::config::ChordWindow;
use crate::keys::TrackedKey;
use crate::ports::Millis;

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Detection {
    None,
    Recovery,
    Fastboot,
    Edl,
}

impl Detection {
    pub const fn is_violation(self) -> bool {
        !matches!(self, Self::None)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Recovery => "Recovery Mode (Power+VolUp)",
            Self::Fastboot => "Fastboot/Download Mode (Power+VolDown)",
            Self::Edl => "EDL Mode (Power+VolUp+VolDown)",
        }
    }
}

/// Stateless evaluator bound to a timing window.
#[derive(Debug, Clone, Copy)]
pub struct ChordDetector {
    window: ChordWindow,
}

impl ChordDetector {
    pub const fn new(window: ChordWindow) -> Self {
        Self { window }
    }

    pub const fn window(&self) -> ChordWindow {
        self.window
    }

    /// Decide whether `state` forms a dangerous chord at `now`.
    pub fn evaluate(&self, state: &ButtonState, now: Millis) -> Detection {
        let timeout = self.window.combo_timeout_ms;

        let Some(power_held_ms) = state.held_for(TrackedKey::Power, now) else {
            return Detection::None;
        };
        if power_held_ms >= timeout {
            // Every chord below requires a fresh Power press.
            return Detection::None;
        }

        let fresh = |key| state.held_for(key, now).is_some_and(|ms| ms < timeout);

        if fresh(TrackedKey::VolumeUp) {
            return Detection::Recovery;
        }
        if fresh(TrackedKey::VolumeDown) {
            return Detection::Fastboot;
        }
        if state.is_pressed(TrackedKey::VolumeUp) && state.is_pressed(TrackedKey::VolumeDown) {
            return Detection::Edl;
        }

        Detection::None
    }
}
