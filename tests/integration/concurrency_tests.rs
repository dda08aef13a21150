//! Concurrent event delivery and control-surface access.
//!
//! Events and control operations arrive from different threads; every
//! observed counter snapshot must be internally consistent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use chordguard::clock::ManualClock;
use chordguard::config::FilterConfig;
use chordguard::filter::Verdict;
use chordguard::keys::TrackedKey;
use chordguard::violations::{VIOLATION_QUEUE_DEPTH, ViolationQueue};
use chordguard::EventFilter;

const ROUNDS: usize = 2_000;

fn enabled() -> FilterConfig {
    FilterConfig {
        enabled: true,
        ..FilterConfig::default()
    }
}

/// Press Power then VolUp, then release both. Returns the number of blocks.
fn recovery_round(f: &EventFilter<&ManualClock, &ViolationQueue>) -> u64 {
    let mut blocks = 0;
    for (key, pressed) in [
        (TrackedKey::Power, true),
        (TrackedKey::VolumeUp, true),
        (TrackedKey::VolumeUp, false),
        (TrackedKey::Power, false),
    ] {
        if f.filter_event(key, pressed) == Verdict::Block {
            blocks += 1;
        }
    }
    blocks
}

#[test]
fn stats_stay_consistent_under_concurrent_readers() {
    let clock = ManualClock::new(0);
    let queue = ViolationQueue::new();
    let f = EventFilter::new(enabled(), &clock, &queue);
    let done = AtomicBool::new(false);

    let blocks = thread::scope(|s| {
        let producers: Vec<_> = (0..2)
            .map(|_| {
                s.spawn(|| {
                    let mut blocks = 0;
                    for _ in 0..ROUNDS {
                        blocks += recovery_round(&f);
                        clock.advance(1);
                    }
                    blocks
                })
            })
            .collect();

        s.spawn(|| {
            while !done.load(Ordering::Relaxed) {
                let stats = f.control().stats();
                assert!(stats.is_consistent(), "torn snapshot: {stats:?}");
                let snap = f.control().snapshot();
                assert!(snap.stats.is_consistent());
                while queue.pop().is_some() {}
            }
        });

        let total: u64 = producers.into_iter().map(|h| h.join().unwrap()).sum();
        done.store(true, Ordering::Relaxed);
        total
    });

    let stats = f.control().stats();
    assert!(stats.is_consistent());
    assert_eq!(stats.blocked_total, blocks);
}

#[test]
fn reset_races_do_not_tear_counters() {
    let clock = ManualClock::new(0);
    let queue = ViolationQueue::new();
    let f = EventFilter::new(enabled(), &clock, &queue);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..ROUNDS {
                recovery_round(&f);
            }
        });
        s.spawn(|| {
            for i in 0..ROUNDS {
                if i % 7 == 0 {
                    f.control().reset_stats();
                }
                if i % 13 == 0 {
                    f.control().set_log_violations(i % 2 == 0);
                }
                assert!(f.control().stats().is_consistent());
            }
        });
    });

    assert!(f.control().stats().is_consistent());
    assert!(queue.len() <= VIOLATION_QUEUE_DEPTH);
}

#[test]
fn full_queue_counts_drops_without_losing_blocks() {
    let clock = ManualClock::new(0);
    let queue = ViolationQueue::new();
    let f = EventFilter::new(enabled(), &clock, &queue);

    let rounds = VIOLATION_QUEUE_DEPTH + 8;
    let mut blocks = 0;
    for _ in 0..rounds {
        blocks += recovery_round(&f);
        clock.advance(1);
    }

    assert_eq!(blocks, rounds as u64);
    assert_eq!(f.control().stats().recovery_attempts, rounds as u64);
    assert_eq!(queue.len(), VIOLATION_QUEUE_DEPTH);
    assert_eq!(queue.take_dropped(), 8);
}
