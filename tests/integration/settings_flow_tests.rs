//! Settings persistence: console write → SettingsStore → restart.

use super::mock_sink::RecordingSink;

use chordguard::adapters::console::{self, ConsoleCommand};
use chordguard::adapters::settings::{MemoryStorage, SettingsStore};
use chordguard::clock::ManualClock;
use chordguard::config::{ChordWindow, FilterConfig};
use chordguard::error::{ConfigError, Error};
use chordguard::ports::StoragePort;
use chordguard::EventFilter;

#[test]
fn first_boot_uses_disabled_defaults() {
    let store = SettingsStore::new(MemoryStorage::new());
    let cfg = store.load_or_default();
    assert!(!cfg.enabled);
    assert!(cfg.log_violations);
    assert_eq!(cfg.window, ChordWindow::default());
}

#[test]
fn toggles_survive_a_restart() {
    let clock = ManualClock::new(0);
    let sink = RecordingSink::new();
    let mut store = SettingsStore::new(MemoryStorage::new());

    {
        let f = EventFilter::new(store.load_or_default(), &clock, &sink);
        for line in ["store enabled 1", "store log_violations 0"] {
            let cmd = ConsoleCommand::parse(line).unwrap();
            assert_eq!(console::execute(cmd, f.control()), "ok\n");
            assert!(cmd.mutates_settings());
            store.save_from(&f.control()).unwrap();
        }
    }

    let restored = EventFilter::new(store.load_or_default(), &clock, &sink);
    assert!(restored.control().enabled());
    assert!(!restored.control().log_violations());
}

#[test]
fn corrupted_blob_falls_back_to_defaults() {
    let mut storage = MemoryStorage::new();
    storage.write("chordguard", "filtercfg", &[0xff; 40]).unwrap();
    let store = SettingsStore::new(storage);

    assert!(store.load().is_err());
    assert_eq!(store.load_or_default(), FilterConfig::default());
}

#[test]
fn out_of_range_window_is_not_persisted() {
    let mut store = SettingsStore::new(MemoryStorage::new());
    let bad = FilterConfig {
        window: ChordWindow {
            combo_timeout_ms: 5,
            ..ChordWindow::default()
        },
        ..FilterConfig::default()
    };

    assert!(matches!(
        store.save(&bad),
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert!(!store.storage().exists("chordguard", "filtercfg"));
}

#[test]
fn clear_forgets_saved_settings() {
    let mut store = SettingsStore::new(MemoryStorage::new());
    store
        .save(&FilterConfig {
            enabled: true,
            ..FilterConfig::default()
        })
        .unwrap();
    assert!(store.load_or_default().enabled);

    store.clear().unwrap();
    assert!(!store.load_or_default().enabled);
}
