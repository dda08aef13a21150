//! Fuzz target: attribute writes
//!
//! The first byte selects an attribute name, the rest is the written text.
//! Verifies:
//! - No panics for arbitrary (possibly non-UTF-8) input
//! - A rejected write leaves every setting untouched
//!
//! cargo fuzz run fuzz_attr_store

#![no_main]

use chordguard::adapters::attributes::AttributeTable;
use chordguard::clock::ManualClock;
use chordguard::config::FilterConfig;
use chordguard::ports::DiscardViolations;
use chordguard::EventFilter;
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 5] = ["enabled", "log_violations", "reset_stats", "stats", "bogus"];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = core::str::from_utf8(rest) else {
        return;
    };

    let clock = ManualClock::new(0);
    let f = EventFilter::new(FilterConfig::default(), &clock, DiscardViolations);
    let attrs = AttributeTable::new(f.control());

    let before = f.control().snapshot();
    let name = NAMES[usize::from(selector) % NAMES.len()];
    if attrs.store(name, text).is_err() {
        assert_eq!(f.control().snapshot(), before);
    }
    let _ = attrs.show(name);
});
