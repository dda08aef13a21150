//! Fuzz target: raw event stream through `EventFilter`
//!
//! Each 7-byte chunk is one step: `[advance_ms: u16][type: u8][code: u16][value: i16]`.
//! Verifies:
//! - No panics for any event sequence or clock movement
//! - `blocked_total` always equals the sum of the per-chord counters
//! - Every blocked event is counted exactly once
//!
//! cargo fuzz run fuzz_raw_events

#![no_main]

use chordguard::clock::ManualClock;
use chordguard::config::FilterConfig;
use chordguard::keys::{EV_KEY, RawKeyEvent};
use chordguard::ports::DiscardViolations;
use chordguard::EventFilter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let clock = ManualClock::new(0);
    let f = EventFilter::new(
        FilterConfig {
            enabled: true,
            ..FilterConfig::default()
        },
        &clock,
        DiscardViolations,
    );

    let mut blocks = 0u64;
    for chunk in data.chunks_exact(7) {
        clock.advance(u64::from(u16::from_le_bytes([chunk[0], chunk[1]])));
        // Bias towards key events so the detector is actually reached.
        let event_type = if chunk[2] < 0xf0 { EV_KEY } else { u16::from(chunk[2]) };
        let event = RawKeyEvent {
            event_type,
            code: u16::from_le_bytes([chunk[3], chunk[4]]),
            value: i32::from(i16::from_le_bytes([chunk[5], chunk[6]])),
        };
        if f.filter_raw(event).is_blocked() {
            blocks += 1;
        }
    }

    let stats = f.control().stats();
    assert!(stats.is_consistent(), "inconsistent counters: {stats:?}");
    assert_eq!(stats.blocked_total, blocks);
});
