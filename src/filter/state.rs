//! Button state tracker.
//!
//! Holds the pressed flag and last press time for every [`TrackedKey`].
//! The press time is stored inside the pressed variant, so it exists
//! exactly while the key is down and cannot be read otherwise.
//!
//! Always mutated with the filter lock held.

use serde::Serialize;

use crate::keys::TrackedKey;
use crate::ports::Millis;

/// State of a single key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Released,
    Pressed {
        since: Millis,
    },
}

/// Press/release status of all tracked keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    keys: [KeyState; TrackedKey::COUNT],
}

impl ButtonState {
    pub const fn new() -> Self {
        Self {
            keys: [KeyState::Released; TrackedKey::COUNT],
        }
    }

    /// Apply one transition. The press time is recorded only on a
    /// released → pressed edge; autorepeat of a held key leaves it alone.
    pub fn on_transition(&mut self, key: TrackedKey, is_pressed: bool, now: Millis) {
        let slot = &mut self.keys[key.index()];
        *slot = match (*slot, is_pressed) {
            (KeyState::Released, true) => KeyState::Pressed { since: now },
            (held @ KeyState::Pressed { .. }, true) => held,
            (_, false) => KeyState::Released,
        };
    }

    pub fn is_pressed(&self, key: TrackedKey) -> bool {
        matches!(self.keys[key.index()], KeyState::Pressed { .. })
    }

    /// Press time of `key`, `None` while released.
    pub fn pressed_since(&self, key: TrackedKey) -> Option<Millis> {
        match self.keys[key.index()] {
            KeyState::Pressed { since } => Some(since),
            KeyState::Released => None,
        }
    }

    /// Milliseconds `key` has been held at `now`, `None` while released.
    pub fn held_for(&self, key: TrackedKey, now: Millis) -> Option<u64> {
        self.pressed_since(key).map(|since| now.saturating_since(since))
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Pressed flags only, for status reporting.
    pub fn pressed_flags(&self) -> PressedKeys {
        PressedKeys {
            power: self.is_pressed(TrackedKey::Power),
            volume_up: self.is_pressed(TrackedKey::VolumeUp),
            volume_down: self.is_pressed(TrackedKey::VolumeDown),
            home: self.is_pressed(TrackedKey::Home),
        }
    }
}

/// Which tracked keys are currently down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PressedKeys {
    pub power: bool,
    pub volume_up: bool,
    pub volume_down: bool,
    pub home: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_released() {
        let s = ButtonState::new();
        for k in TrackedKey::ALL {
            assert!(!s.is_pressed(k));
            assert_eq!(s.pressed_since(k), None);
        }
    }

    #[test]
    fn press_records_time_release_clears_it() {
        let mut s = ButtonState::new();
        s.on_transition(TrackedKey::Power, true, Millis(100));
        assert_eq!(s.pressed_since(TrackedKey::Power), Some(Millis(100)));
        s.on_transition(TrackedKey::Power, false, Millis(200));
        assert!(!s.is_pressed(TrackedKey::Power));
        assert_eq!(s.pressed_since(TrackedKey::Power), None);
    }

    #[test]
    fn repeat_press_keeps_original_time() {
        let mut s = ButtonState::new();
        s.on_transition(TrackedKey::VolumeUp, true, Millis(100));
        s.on_transition(TrackedKey::VolumeUp, true, Millis(900));
        assert_eq!(s.pressed_since(TrackedKey::VolumeUp), Some(Millis(100)));
    }

    #[test]
    fn release_of_released_key_is_noop() {
        let mut s = ButtonState::new();
        s.on_transition(TrackedKey::Home, false, Millis(5));
        assert_eq!(s, ButtonState::new());
    }

    #[test]
    fn held_for_saturates() {
        let mut s = ButtonState::new();
        s.on_transition(TrackedKey::Power, true, Millis(500));
        assert_eq!(s.held_for(TrackedKey::Power, Millis(400)), Some(0));
        assert_eq!(s.held_for(TrackedKey::Power, Millis(700)), Some(200));
        assert_eq!(s.held_for(TrackedKey::VolumeDown, Millis(700)), None);
    }

    #[test]
    fn clear_releases_everything() {
        let mut s = ButtonState::new();
        s.on_transition(TrackedKey::Power, true, Millis(1));
        s.on_transition(TrackedKey::Home, true, Millis(2));
        s.clear();
        assert_eq!(s.pressed_flags(), PressedKeys::default());
    }
}
