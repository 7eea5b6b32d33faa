//! Discrete action dispatch with cooldowns.
//!
//! Every frame with a hand, each gesture category is evaluated against the
//! same snapshot, in order: pointing (move and double click), left click,
//! right click, scroll. Categories are independent except where they share
//! a cooldown key.
//!
//! Left and right click share one cooldown key, so within
//! [`CLICK_COOLDOWN`] of either click the other cannot fire either. This
//! coupling is observable behavior and is kept as is.

use std::collections::HashMap;
use std::time::Duration;

use gesturemouse_common::clock::{elapsed_exceeds, TimestampNs};
use gesturemouse_hand_model::PointerCommand;

use crate::classifier::GestureSnapshot;
use crate::smoother::AdaptiveSmoother;

pub const CLICK_COOLDOWN: Duration = Duration::from_millis(500);
pub const SCROLL_COOLDOWN: Duration = Duration::from_millis(120);

/// After a double click, all gesture dispatch pauses for this long.
pub const DOUBLE_CLICK_PAUSE: Duration = Duration::from_millis(400);

/// Scroll units per normalized unit of index-to-thumb offset.
pub const SCROLL_SPEED: f64 = 120.0;

/// Discrete actions subject to a cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    LeftClick,
    RightClick,
    Scroll,
    DoubleClick,
}

impl ActionKind {
    /// The key the action's last-emitted time is stored under.
    fn cooldown_key(self) -> ActionKind {
        match self {
            ActionKind::RightClick => ActionKind::LeftClick,
            other => other,
        }
    }

    fn cooldown(self) -> Duration {
        match self {
            ActionKind::LeftClick | ActionKind::RightClick => CLICK_COOLDOWN,
            ActionKind::Scroll => SCROLL_COOLDOWN,
            ActionKind::DoubleClick => DOUBLE_CLICK_PAUSE,
        }
    }
}

/// Last emission time per cooldown key.
#[derive(Debug, Clone, Default)]
pub struct CooldownClock {
    last: HashMap<ActionKind, TimestampNs>,
}

impl CooldownClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `kind` may fire at `now`. A never-stamped key is always ready.
    pub fn ready(&self, kind: ActionKind, now: TimestampNs) -> bool {
        match self.last.get(&kind.cooldown_key()) {
            Some(&last) => elapsed_exceeds(last, now, kind.cooldown()),
            None => true,
        }
    }

    pub fn stamp(&mut self, kind: ActionKind, now: TimestampNs) {
        self.last.insert(kind.cooldown_key(), now);
    }

    pub fn last_emitted(&self, kind: ActionKind) -> Option<TimestampNs> {
        self.last.get(&kind.cooldown_key()).copied()
    }
}

/// Scroll command for an index-minus-thumb offset. The dominant axis
/// wins; ties go horizontal. Amounts truncate toward zero.
pub fn scroll_command(dx: f64, dy: f64) -> PointerCommand {
    if dy.abs() > dx.abs() {
        PointerCommand::Scroll {
            amount: (-dy * SCROLL_SPEED) as i32,
        }
    } else {
        PointerCommand::HScroll {
            amount: (dx * SCROLL_SPEED) as i32,
        }
    }
}

/// Decides which discrete commands a frame emits.
#[derive(Debug, Clone, Default)]
pub struct EventDispatcher {
    cooldowns: CooldownClock,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cooldowns(&self) -> &CooldownClock {
        &self.cooldowns
    }

    /// Whether a recent double click is still pausing dispatch.
    pub fn is_suppressed(&self, now: TimestampNs) -> bool {
        !self.cooldowns.ready(ActionKind::DoubleClick, now)
    }

    /// Evaluate all gesture categories for one frame, appending emitted
    /// commands to `out`. Pointing drives `smoother` toward the snapshot
    /// target.
    pub fn dispatch(
        &mut self,
        snapshot: &GestureSnapshot,
        now: TimestampNs,
        smoother: &mut AdaptiveSmoother,
        out: &mut Vec<PointerCommand>,
    ) {
        if self.is_suppressed(now) {
            return;
        }

        let signals = snapshot.signals();

        if signals.two_finger_point {
            smoother.update(snapshot.target);
            out.push(smoother.move_command());

            if signals.fingers_together {
                tracing::debug!(gap = snapshot.index_middle_gap, "Double click");
                out.push(PointerCommand::DoubleClick);
                self.cooldowns.stamp(ActionKind::DoubleClick, now);
                return;
            }
        }

        if signals.pinch && self.cooldowns.ready(ActionKind::LeftClick, now) {
            tracing::debug!(distance = snapshot.index_thumb, "Left click");
            out.push(PointerCommand::Click);
            self.cooldowns.stamp(ActionKind::LeftClick, now);
        }

        if signals.pinky_pinch && self.cooldowns.ready(ActionKind::RightClick, now) {
            tracing::debug!(distance = snapshot.pinky_thumb, "Right click");
            out.push(PointerCommand::RightClick);
            self.cooldowns.stamp(ActionKind::RightClick, now);
        }

        if signals.scroll_grip && self.cooldowns.ready(ActionKind::Scroll, now) {
            let (dx, dy) = snapshot.scroll_delta;
            let command = scroll_command(dx, dy);
            tracing::trace!(?command, "Scroll");
            out.push(command);
            self.cooldowns.stamp(ActionKind::Scroll, now);
        }
    }
}
