//! Control surface → EventFilter: toggles, counters, and the text
//! attribute front-end.

use super::mock_sink::RecordingSink;

use chordguard::adapters::attributes::AttributeTable;
use chordguard::adapters::console::{self, ConsoleCommand};
use chordguard::adapters::status::StatusReport;
use chordguard::clock::ManualClock;
use chordguard::config::FilterConfig;
use chordguard::error::ControlError;
use chordguard::filter::{Detection, StatsSnapshot, Verdict};
use chordguard::keys::{KEY_POWER, KEY_VOLUMEDOWN, KEY_VOLUMEUP, RawKeyEvent, TrackedKey};
use chordguard::ports::Millis;
use chordguard::EventFilter;

fn press(code: u16) -> RawKeyEvent {
    RawKeyEvent::key(code, 1)
}

#[test]
fn enabling_through_attribute_starts_blocking() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::new();
    let f = EventFilter::new(FilterConfig::default(), &clock, &sink);
    let attrs = AttributeTable::new(f.control());

    assert_eq!(attrs.show("enabled").unwrap().as_str(), "0\n");
    f.filter_raw(press(KEY_POWER));
    assert_eq!(f.filter_raw(press(KEY_VOLUMEUP)), Verdict::Allow);

    attrs.store("enabled", "1").unwrap();
    clock.advance(10);
    // Keys pressed while disabled were never tracked, so Power is not held.
    assert_eq!(f.filter_raw(press(KEY_VOLUMEUP)), Verdict::Allow);
    assert_eq!(f.filter_raw(RawKeyEvent::key(KEY_VOLUMEUP, 0)), Verdict::Allow);
    assert_eq!(f.filter_raw(press(KEY_POWER)), Verdict::Allow);
    assert_eq!(f.filter_raw(press(KEY_VOLUMEDOWN)), Verdict::Block);

    assert_eq!(
        attrs.show("stats").unwrap().as_str(),
        "Total Blocked: 1\nRecovery Attempts: 0\nFastboot Attempts: 1\nEDL Attempts: 0\n"
    );
}

#[test]
fn invalid_boolean_leaves_setting_unchanged() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::new();
    let f = EventFilter::new(FilterConfig::default(), &clock, &sink);
    let attrs = AttributeTable::new(f.control());

    assert_eq!(attrs.store("enabled", "maybe"), Err(ControlError::InvalidBoolean));
    assert!(!f.control().enabled());
    assert_eq!(attrs.store("log_violations", ""), Err(ControlError::InvalidBoolean));
    assert!(f.control().log_violations());
}

#[test]
fn attribute_modes_are_enforced() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::new();
    let f = EventFilter::new(FilterConfig::default(), &clock, &sink);
    let attrs = AttributeTable::new(f.control());

    assert_eq!(attrs.store("stats", "0"), Err(ControlError::NotWritable));
    assert_eq!(attrs.show("reset_stats").err(), Some(ControlError::NotReadable));
    assert_eq!(attrs.show("uptime").err(), Some(ControlError::UnknownAttribute));
}

#[test]
fn reset_through_attribute_ignores_value() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::new();
    let f = EventFilter::new(
        FilterConfig { enabled: true, ..FilterConfig::default() },
        &clock,
        &sink,
    );
    f.filter_raw(press(KEY_POWER));
    f.filter_raw(press(KEY_VOLUMEUP));
    assert_eq!(f.control().stats().recovery_attempts, 1);

    AttributeTable::new(f.control()).store("reset_stats", "anything").unwrap();
    assert_eq!(f.control().stats(), StatsSnapshot::default());
}

#[test]
fn log_toggle_controls_sink_but_not_blocking() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::new();
    let f = EventFilter::new(
        FilterConfig { enabled: true, ..FilterConfig::default() },
        &clock,
        &sink,
    );

    f.control().set_log_violations(false);
    f.filter_event(TrackedKey::Power, true);
    assert_eq!(f.filter_event(TrackedKey::VolumeUp, true), Verdict::Block);
    assert!(sink.records().is_empty());

    f.control().set_log_violations(true);
    clock.set(40);
    assert_eq!(f.filter_event(TrackedKey::VolumeDown, true), Verdict::Block);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, Detection::Recovery);
    assert_eq!(records[0].key, TrackedKey::VolumeDown);
    assert_eq!(records[0].code, KEY_VOLUMEDOWN);
    assert_eq!(records[0].timestamp, Millis(40));
}

#[test]
fn refused_record_still_blocks_and_counts() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::with_capacity(1);
    let f = EventFilter::new(
        FilterConfig { enabled: true, ..FilterConfig::default() },
        &clock,
        &sink,
    );

    f.filter_raw(press(KEY_POWER));
    assert_eq!(f.filter_raw(press(KEY_VOLUMEUP)), Verdict::Block);
    assert_eq!(f.filter_raw(RawKeyEvent::key(KEY_VOLUMEUP, 2)), Verdict::Block);

    assert_eq!(sink.records().len(), 1);
    assert_eq!(sink.refused(), 1);
    assert_eq!(f.control().stats().recovery_attempts, 2);
}

#[test]
fn console_status_reflects_live_state() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::new();
    let f = EventFilter::new(FilterConfig::default(), &clock, &sink);

    assert_eq!(console::execute(ConsoleCommand::Store("enabled", "on"), f.control()), "ok\n");
    f.filter_raw(press(KEY_POWER));

    let status = console::execute(ConsoleCommand::Status, f.control());
    assert!(status.contains("Status: ENABLED"));
    assert!(status.contains("Power: PRESSED"));
    assert_eq!(status, StatusReport::new(f.control().snapshot()).to_string());

    let json: serde_json::Value =
        serde_json::from_str(&console::execute(ConsoleCommand::Json, f.control())).unwrap();
    assert_eq!(json["enabled"], true);
    assert_eq!(json["buttons"]["power"], true);
}
