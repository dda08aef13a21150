//! ChordGuard firmware — main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioKeys        LogViolationSink   NvsStorage   MonotonicClock│
//! │  (key source)    (violation log)    (settings)   (Clock)       │
//! │  Serial console ─▶ AttributeTable ─▶ ControlSurface            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          EventFilter (pure logic, lock-guarded)        │    │
//! │  │  ButtonState · ChordDetector · Statistics              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Button wiring (active-low, internal pull-ups):
//! Power = GPIO0, Volume Up = GPIO4, Volume Down = GPIO5, Home = GPIO6.
#![deny(unused_must_use)]

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::{AnyInputPin, Input, InputPin as _, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{debug, info, warn};

use chordguard::adapters::console::{self, ConsoleCommand};
use chordguard::adapters::log_sink::LogViolationSink;
use chordguard::adapters::nvs::NvsStorage;
use chordguard::adapters::settings::SettingsStore;
use chordguard::clock::MonotonicClock;
use chordguard::config::FilterConfig;
use chordguard::drivers::gpio_keys::GpioKeys;
use chordguard::filter::{EventFilter, Verdict};
use chordguard::keys::TrackedKey;
use chordguard::ports::Clock;
use chordguard::violations::ViolationQueue;

type KeyPin = PinDriver<'static, AnyInputPin, Input>;
type Filter = EventFilter<MonotonicClock, &'static ViolationQueue>;

/// Key poll period.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

static VIOLATIONS: ViolationQueue = ViolationQueue::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ChordGuard v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Load settings from NVS (or defaults) ───────────────
    let mut settings = match NvsStorage::new() {
        Ok(nvs) => Some(SettingsStore::new(nvs)),
        Err(e) => {
            warn!("NVS init failed ({e}), running with defaults and no persistence");
            None
        }
    };
    let config = settings
        .as_ref()
        .map_or_else(FilterConfig::default, SettingsStore::load_or_default);

    // ── 3. Key inputs ─────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let mut keys: GpioKeys<KeyPin> = GpioKeys::new();
    for (key, pin) in [
        (TrackedKey::Power, peripherals.pins.gpio0.downgrade_input()),
        (TrackedKey::VolumeUp, peripherals.pins.gpio4.downgrade_input()),
        (TrackedKey::VolumeDown, peripherals.pins.gpio5.downgrade_input()),
        (TrackedKey::Home, peripherals.pins.gpio6.downgrade_input()),
    ] {
        let mut driver = PinDriver::input(pin)?;
        driver.set_pull(Pull::Up)?;
        if keys.bind(key, driver).is_err() {
            warn!("{} already bound, skipping", key.label());
        }
    }

    // ── 4. Filter ─────────────────────────────────────────────
    let filter: Filter = EventFilter::new(config, MonotonicClock::new(), &VIOLATIONS);
    info!(
        "Filter {} (combo window {} ms)",
        if config.enabled { "ENABLED" } else { "DISABLED" },
        filter.window().combo_timeout_ms
    );

    let mut log_sink = LogViolationSink::new();

    thread::scope(|s| {
        s.spawn(|| console_loop(&filter, settings.as_mut()));
        key_loop(&filter, &mut keys, &mut log_sink);
    });

    Ok(())
}

/// Poll the buttons, run every edge through the filter, and drain the
/// violation log. Never returns.
fn key_loop(filter: &Filter, keys: &mut GpioKeys<KeyPin>, log_sink: &mut LogViolationSink) {
    let clock = MonotonicClock::new();
    loop {
        for edge in keys.poll(clock.now()) {
            match filter.filter_event(edge.key, edge.pressed) {
                Verdict::Allow => debug!(
                    "{} {} forwarded",
                    edge.key.label(),
                    if edge.pressed { "down" } else { "up" }
                ),
                Verdict::Block => debug!("{} suppressed", edge.key.label()),
            }
        }
        log_sink.drain(&VIOLATIONS);
        thread::sleep(POLL_INTERVAL);
    }
}

/// Serve control-surface commands from the UART console.
fn console_loop(filter: &Filter, mut settings: Option<&mut SettingsStore<NvsStorage>>) {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let Some(cmd) = ConsoleCommand::parse(&line) else {
            let _ = writeln!(stdout, "usage: show <attr> | store <attr> <value> | status | json");
            continue;
        };

        let reply = console::execute(cmd, filter.control());
        let _ = stdout.write_all(reply.as_bytes());
        let _ = stdout.flush();

        if cmd.mutates_settings() {
            if let Some(store) = settings.as_deref_mut() {
                if let Err(e) = store.save_from(&filter.control()) {
                    warn!("Settings save failed: {e}");
                }
            }
        }
    }
    warn!("Console input closed");
}
