//! Adaptive cursor smoothing.
//!
//! Each update moves the running estimate a fraction of the way toward
//! the raw target. That fraction is `smoothing × gain`, both derived
//! from the current speed (distance between estimate and target, in
//! screen pixels):
//!
//! - `gain` grows with speed, so deliberate swipes stay responsive
//! - `smoothing` shrinks with speed, so hand tremor at rest is damped
//! - below [`VELOCITY_DEADZONE`] the target is ignored entirely

use gesturemouse_hand_model::PointerCommand;
use gesturemouse_platform_core::CursorPosition;

use crate::geometry::clamp;

/// Motions shorter than this (pixels) are treated as jitter.
pub const VELOCITY_DEADZONE: f64 = 2.5;

pub const MIN_GAIN: f64 = 0.8;
pub const MAX_GAIN: f64 = 2.4;
pub const MIN_SMOOTH: f64 = 0.08;
pub const MAX_SMOOTH: f64 = 0.30;

/// Speed (pixels) per unit of extra gain.
const GAIN_SPEED_SCALE: f64 = 30.0;
/// Speed (pixels) per unit of lost smoothing.
const SMOOTH_SPEED_SCALE: f64 = 50.0;

/// Gain applied at the given speed, in `[MIN_GAIN, MAX_GAIN]`.
pub fn gain_for_speed(speed: f64) -> f64 {
    clamp(MIN_GAIN + speed / GAIN_SPEED_SCALE, MIN_GAIN, MAX_GAIN)
}

/// Smoothing fraction at the given speed, in `[MIN_SMOOTH, MAX_SMOOTH]`.
pub fn smoothing_for_speed(speed: f64) -> f64 {
    clamp(MAX_SMOOTH - speed / SMOOTH_SPEED_SCALE, MIN_SMOOTH, MAX_SMOOTH)
}

/// One smoothing step from `current` toward `target`.
pub fn smooth_step(current: CursorPosition, target: CursorPosition) -> CursorPosition {
    let speed = (target.x - current.x).hypot(target.y - current.y);

    let target = if speed < VELOCITY_DEADZONE {
        current
    } else {
        target
    };

    let factor = smoothing_for_speed(speed) * gain_for_speed(speed);
    CursorPosition::new(
        current.x + (target.x - current.x) * factor,
        current.y + (target.y - current.y) * factor,
    )
}

/// Owns the session's cursor estimate.
#[derive(Debug, Clone)]
pub struct AdaptiveSmoother {
    estimate: CursorPosition,
}

impl AdaptiveSmoother {
    /// Start from the pointer position reported by the OS.
    pub fn new(initial: CursorPosition) -> Self {
        Self { estimate: initial }
    }

    /// Current estimate.
    pub fn estimate(&self) -> CursorPosition {
        self.estimate
    }

    /// Feed a raw target and return the new estimate.
    pub fn update(&mut self, target: CursorPosition) -> CursorPosition {
        self.estimate = smooth_step(self.estimate, target);
        self.estimate
    }

    /// Move command for the current estimate, truncated to whole pixels.
    pub fn move_command(&self) -> PointerCommand {
        PointerCommand::MoveTo {
            x: self.estimate.x as i32,
            y: self.estimate.y as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn jitter_inside_deadzone_is_ignored() {
        let mut smoother = AdaptiveSmoother::new(CursorPosition::new(500.0, 300.0));
        let next = smoother.update(CursorPosition::new(501.5, 301.5));
        assert_eq!(next, CursorPosition::new(500.0, 300.0));
    }

    #[test]
    fn slow_motion_is_heavily_damped() {
        // speed 10: gain 0.8 + 1/3, smoothing 0.3 - 0.2 = 0.1
        let next = smooth_step(CursorPosition::new(0.0, 0.0), CursorPosition::new(10.0, 0.0));
        let expected = 10.0 * 0.1 * (0.8 + 10.0 / 30.0);
        assert!((next.x - expected).abs() < 1e-9);
        assert_eq!(next.y, 0.0);
    }

    #[test]
    fn fast_motion_uses_clamped_factors() {
        // speed 300: both factors saturate (gain 2.4, smoothing 0.08)
        let next = smooth_step(CursorPosition::new(0.0, 0.0), CursorPosition::new(0.0, 300.0));
        assert!((next.y - 300.0 * 0.08 * 2.4).abs() < 1e-9);
    }

    #[test]
    fn repeated_updates_converge_on_target() {
        let mut smoother = AdaptiveSmoother::new(CursorPosition::new(0.0, 0.0));
        let target = CursorPosition::new(800.0, 450.0);
        for _ in 0..200 {
            smoother.update(target);
        }
        let est = smoother.estimate();
        assert!((est.x - 800.0).abs() < VELOCITY_DEADZONE);
        assert!((est.y - 450.0).abs() < VELOCITY_DEADZONE);
    }

    #[test]
    fn move_command_truncates() {
        let smoother = AdaptiveSmoother::new(CursorPosition::new(10.9, 20.2));
        assert_eq!(smoother.move_command(), PointerCommand::MoveTo { x: 10, y: 20 });
    }

    proptest! {
        #[test]
        fn deadzone_targets_leave_estimate_unchanged(
            x in -5000.0f64..5000.0,
            y in -5000.0f64..5000.0,
            angle in 0.0f64..std::f64::consts::TAU,
            radius in 0.0f64..2.49,
        ) {
            let current = CursorPosition::new(x, y);
            let target = CursorPosition::new(x + radius * angle.cos(), y + radius * angle.sin());
            prop_assert_eq!(smooth_step(current, target), current);
        }

        #[test]
        fn factors_stay_in_bounds_and_are_monotonic(a in 0.0f64..10_000.0, b in 0.0f64..10_000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for speed in [lo, hi] {
                prop_assert!((MIN_GAIN..=MAX_GAIN).contains(&gain_for_speed(speed)));
                prop_assert!((MIN_SMOOTH..=MAX_SMOOTH).contains(&smoothing_for_speed(speed)));
            }
            prop_assert!(gain_for_speed(lo) <= gain_for_speed(hi));
            prop_assert!(smoothing_for_speed(lo) >= smoothing_for_speed(hi));
        }
    }
}
