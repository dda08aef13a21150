//! Polled GPIO key source.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups, one GPIO per tracked key.
//! The main loop calls [`GpioKeys::poll`] every few milliseconds; a level
//! change must hold for [`DEBOUNCE_MS`] before it is reported as a
//! transition.
//!
//! A pin read error is treated as "no change" for that poll.

use embedded_hal::digital::InputPin;

use crate::keys::TrackedKey;
use crate::ports::Millis;

pub const DEBOUNCE_MS: u64 = 20;

/// Debounced edge on one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: TrackedKey,
    pub pressed: bool,
    pub at: Millis,
}

struct BoundPin<P> {
    key: TrackedKey,
    pin: P,
    /// Debounced level.
    pressed: bool,
    /// Raw level that differs from `pressed`, and when it was first seen.
    pending: Option<(bool, Millis)>,
}

/// Up to one pin per tracked key.
pub struct GpioKeys<P> {
    pins: heapless::Vec<BoundPin<P>, { TrackedKey::COUNT }>,
}

impl<P> Default for GpioKeys<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> GpioKeys<P> {
    pub fn new() -> Self {
        Self {
            pins: heapless::Vec::new(),
        }
    }
}

impl<P: InputPin> GpioKeys<P> {
    /// Bind `pin` to `key`. Returns the pin back if all slots are used or
    /// the key is already bound.
    pub fn bind(&mut self, key: TrackedKey, pin: P) -> Result<(), P> {
        if self.pins.iter().any(|b| b.key == key) {
            return Err(pin);
        }
        self.pins
            .push(BoundPin {
                key,
                pin,
                pressed: false,
                pending: None,
            })
            .map_err(|b| b.pin)
    }

    /// Sample every pin and return the debounced edges.
    pub fn poll(&mut self, now: Millis) -> heapless::Vec<KeyTransition, { TrackedKey::COUNT }> {
        let mut out = heapless::Vec::new();
        for b in &mut self.pins {
            let Ok(low) = b.pin.is_low() else {
                continue;
            };
            let raw_pressed = low;

            if raw_pressed == b.pressed {
                b.pending = None;
                continue;
            }
            match b.pending {
                Some((level, since)) if level == raw_pressed => {
                    if now.saturating_since(since) >= DEBOUNCE_MS {
                        b.pressed = raw_pressed;
                        b.pending = None;
                        // Capacity equals the pin count; push cannot fail.
                        let _ = out.push(KeyTransition {
                            key: b.key,
                            pressed: raw_pressed,
                            at: now,
                        });
                    }
                }
                _ => b.pending = Some((raw_pressed, now)),
            }
        }
        out
    }
}
