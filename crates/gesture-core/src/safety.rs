//! Tracking-loss safety.
//!
//! If no hand has been seen for longer than [`HAND_LOST_TIMEOUT`], any
//! held drag is released. This bounds how long the primary button can stay
//! pressed after the hand leaves the camera or the detector fails.

use std::time::Duration;

use gesturemouse_common::clock::{elapsed_exceeds, TimestampNs};
use gesturemouse_hand_model::PointerCommand;

use crate::drag::DragMachine;

pub const HAND_LOST_TIMEOUT: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    last_hand_seen: TimestampNs,
    timeout: Duration,
    releases: u64,
}

impl SafetyMonitor {
    /// Start monitoring; the session start counts as the last sighting.
    pub fn new(session_start: TimestampNs) -> Self {
        Self {
            last_hand_seen: session_start,
            timeout: HAND_LOST_TIMEOUT,
            releases: 0,
        }
    }

    pub fn last_hand_seen(&self) -> TimestampNs {
        self.last_hand_seen
    }

    /// Number of drags this monitor has force-released.
    pub fn releases(&self) -> u64 {
        self.releases
    }

    /// Record a frame with a detected hand.
    pub fn hand_seen(&mut self, now: TimestampNs) {
        self.last_hand_seen = self.last_hand_seen.max(now);
    }

    pub fn hand_lost(&self, now: TimestampNs) -> bool {
        elapsed_exceeds(self.last_hand_seen, now, self.timeout)
    }

    /// Run once per loop iteration. Returns `MouseUp` when a drag had to
    /// be released.
    pub fn check(&mut self, now: TimestampNs, drag: &mut DragMachine) -> Option<PointerCommand> {
        if !self.hand_lost(now) {
            return None;
        }

        let command = drag.force_release()?;
        self.releases += 1;
        tracing::warn!(
            since_last_hand_ms = now.saturating_sub(self.last_hand_seen) / 1_000_000,
            "Hand lost while dragging, releasing"
        );
        Some(command)
    }
}
