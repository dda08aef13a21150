//! Tracked keys and raw event normalisation.
//!
//! The event source speaks Linux input encoding (`type`, `code`, `value`).
//! [`normalize`] maps that onto the closed [`TrackedKey`] set so nothing
//! downstream ever sees a raw key code.
//!
//! | Code | Name           | Tracked as   |
//! |------|----------------|--------------|
//! | 116  | `KEY_POWER`    | `Power`      |
//! | 115  | `KEY_VOLUMEUP` | `VolumeUp`   |
//! | 114  | `KEY_VOLUMEDOWN` | `VolumeDown` |
//! | 102  | `KEY_HOME`     | `Home`       |
//! | 172  | `KEY_HOMEPAGE` | `Home`       |

use serde::{Deserialize, Serialize};

/// `EV_KEY` event type.
pub const EV_KEY: u16 = 0x01;

pub const KEY_HOME: u16 = 102;
pub const KEY_VOLUMEDOWN: u16 = 114;
pub const KEY_VOLUMEUP: u16 = 115;
pub const KEY_POWER: u16 = 116;
pub const KEY_HOMEPAGE: u16 = 172;

/// Keys the filter tracks. Fixed set; no dynamic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TrackedKey {
    Power = 0,
    VolumeUp = 1,
    VolumeDown = 2,
    Home = 3,
}

impl TrackedKey {
    /// Total number of tracked keys — used to size state arrays.
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [Self::Power, Self::VolumeUp, Self::VolumeDown, Self::Home];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map a raw key code, or `None` for anything untracked.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            KEY_POWER => Some(Self::Power),
            KEY_VOLUMEUP => Some(Self::VolumeUp),
            KEY_VOLUMEDOWN => Some(Self::VolumeDown),
            KEY_HOME | KEY_HOMEPAGE => Some(Self::Home),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::VolumeUp => "Volume Up",
            Self::VolumeDown => "Volume Down",
            Self::Home => "Home",
        }
    }
}

/// An input event as delivered by the event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub event_type: u16,
    pub code: u16,
    /// 0 = release, 1 = press, 2 = autorepeat.
    pub value: i32,
}

impl RawKeyEvent {
    pub const fn key(code: u16, value: i32) -> Self {
        Self {
            event_type: EV_KEY,
            code,
            value,
        }
    }
}

/// A raw event reduced to what the filter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Tracked { key: TrackedKey, pressed: bool },
    Untracked,
}

/// Normalise a raw event. Non-key events and unknown codes are `Untracked`.
/// Any non-zero value (press or autorepeat) means the key is down.
pub const fn normalize(ev: RawKeyEvent) -> KeyInput {
    if ev.event_type != EV_KEY {
        return KeyInput::Untracked;
    }
    match TrackedKey::from_code(ev.code) {
        Some(key) => KeyInput::Tracked {
            key,
            pressed: ev.value != 0,
        },
        None => KeyInput::Untracked,
    }
}

/// Key capabilities advertised by an input device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub has_power: bool,
    pub has_volume_up: bool,
    pub has_volume_down: bool,
}

impl DeviceCapabilities {
    /// Build from the device's supported key codes.
    pub fn from_codes(codes: &[u16]) -> Self {
        Self {
            has_power: codes.contains(&KEY_POWER),
            has_volume_up: codes.contains(&KEY_VOLUMEUP),
            has_volume_down: codes.contains(&KEY_VOLUMEDOWN),
        }
    }

    /// Only devices that can produce part of a chord are worth attaching to.
    pub fn should_monitor(&self) -> bool {
        self.has_power || self.has_volume_up || self.has_volume_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_tracked_codes() {
        assert_eq!(
            normalize(RawKeyEvent::key(KEY_POWER, 1)),
            KeyInput::Tracked { key: TrackedKey::Power, pressed: true }
        );
        assert_eq!(
            normalize(RawKeyEvent::key(KEY_VOLUMEDOWN, 0)),
            KeyInput::Tracked { key: TrackedKey::VolumeDown, pressed: false }
        );
    }

    #[test]
    fn home_and_homepage_are_the_same_key() {
        assert_eq!(TrackedKey::from_code(KEY_HOME), Some(TrackedKey::Home));
        assert_eq!(TrackedKey::from_code(KEY_HOMEPAGE), Some(TrackedKey::Home));
    }

    #[test]
    fn autorepeat_counts_as_pressed() {
        assert_eq!(
            normalize(RawKeyEvent::key(KEY_VOLUMEUP, 2)),
            KeyInput::Tracked { key: TrackedKey::VolumeUp, pressed: true }
        );
    }

    #[test]
    fn unknown_code_is_untracked() {
        assert_eq!(normalize(RawKeyEvent::key(30, 1)), KeyInput::Untracked);
    }

    #[test]
    fn non_key_event_is_untracked() {
        let syn = RawKeyEvent { event_type: 0, code: KEY_POWER, value: 1 };
        assert_eq!(normalize(syn), KeyInput::Untracked);
    }

    #[test]
    fn index_matches_all_order() {
        for (i, k) in TrackedKey::ALL.iter().enumerate() {
            assert_eq!(k.index(), i);
        }
    }

    #[test]
    fn keyboard_without_chord_keys_is_skipped() {
        let caps = DeviceCapabilities::from_codes(&[30, 31, 32, KEY_HOME]);
        assert!(!caps.should_monitor());
        let caps = DeviceCapabilities::from_codes(&[KEY_VOLUMEDOWN]);
        assert!(caps.should_monitor());
    }
}
