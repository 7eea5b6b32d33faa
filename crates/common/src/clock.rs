//! Clock and timing utilities for the frame loop.
//!
//! Every per-frame decision (cooldowns, the tracking-loss timeout, the
//! double-click suppression window) is made against a monotonic
//! nanosecond timestamp supplied by a [`Clock`]. Live sessions use a
//! [`MonotonicClock`] anchored at session start; tests and offline
//! replays drive a [`ManualClock`] explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic nanoseconds since the clock epoch.
pub type TimestampNs = u64;

/// Source of monotonic timestamps.
pub trait Clock: Send {
    /// Nanoseconds elapsed since the clock epoch.
    fn now_ns(&self) -> TimestampNs;
}

/// A clock that provides monotonic timestamps relative to a fixed
/// epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl MonotonicClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> TimestampNs {
        self.epoch.elapsed().as_nanos() as u64
    }
}

/// A manually driven clock. Clones share the same current time, so a
/// tracker replaying recorded frames can advance the clock the frame
/// loop reads from.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading `start_ns`.
    pub fn new(start_ns: TimestampNs) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ns)),
        }
    }

    /// Jump to an absolute time. Times earlier than the current one are ignored.
    pub fn set(&self, ns: TimestampNs) {
        self.now.fetch_max(ns, Ordering::SeqCst);
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now
            .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> TimestampNs {
        self.now.load(Ordering::SeqCst)
    }
}

/// Convert a nanosecond value to seconds.
pub fn ns_to_secs(ns: u64) -> f64 {
    ns as f64 / 1_000_000_000.0
}

/// Convert seconds to nanoseconds.
pub fn secs_to_ns(secs: f64) -> u64 {
    (secs * 1_000_000_000.0) as u64
}

/// Whether strictly more than `window` has passed between `since` and `now`.
///
/// A `now` earlier than `since` counts as no time elapsed.
pub fn elapsed_exceeds(since: TimestampNs, now: TimestampNs, window: Duration) -> bool {
    now.saturating_sub(since) > window.as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = MonotonicClock::start();
        // Should be very small but non-negative
        assert!(clock.now_ns() < 1_000_000_000); // less than 1 second
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
        assert_eq!(secs_to_ns(2.0), 2_000_000_000);
    }

    #[test]
    fn test_manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new(10);
        let handle = clock.clone();
        handle.advance(Duration::from_millis(5));
        assert_eq!(clock.now_ns(), 5_000_010);

        // never runs backwards
        handle.set(0);
        assert_eq!(clock.now_ns(), 5_000_010);
    }

    #[test]
    fn test_elapsed_exceeds_is_strict() {
        let window = Duration::from_millis(400);
        assert!(!elapsed_exceeds(0, 400_000_000, window));
        assert!(elapsed_exceeds(0, 400_000_001, window));
        assert!(!elapsed_exceeds(500, 100, window));
    }
}
