//! Per-frame gesture classification.
//!
//! The classifier is stateless: everything it reports is derived from the
//! current frame's landmarks and the screen size.

use gesturemouse_hand_model::{
    HandLandmarks, Landmark, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
    RING_PIP, RING_TIP,
};
use gesturemouse_platform_core::{CursorPosition, ScreenSize};

use crate::geometry::{clamp, distance, finger_up};

/// Fraction of the camera field trimmed on each side before mapping the
/// remaining central region onto the whole screen.
pub const FRAME_MARGIN: f64 = 0.15;

/// Pixels kept between the pointer target and each screen edge.
pub const EDGE_MARGIN: f64 = 6.0;

/// Fingertip-to-thumb distance (normalized) that counts as a pinch.
pub const PINCH_DISTANCE: f64 = 0.06;

/// Horizontal index/middle tip gap (normalized) that triggers a double click.
pub const DOUBLE_CLICK_SPREAD: f64 = 0.025;

/// Which of the four long fingers are extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerFlags {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerFlags {
    pub const fn new(index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Fist: every finger folded.
    pub fn all_down(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }

    /// Open hand: every finger extended.
    pub fn all_up(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }

    /// Index and middle extended, ring and pinky folded.
    pub fn two_finger_point(&self) -> bool {
        self.index && self.middle && !self.ring && !self.pinky
    }

    /// Middle, ring, and pinky folded (index unconstrained).
    pub fn lower_three_down(&self) -> bool {
        !self.middle && !self.ring && !self.pinky
    }
}

/// Candidate gestures present in one frame. Several can hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureSignals {
    pub fist: bool,
    pub open_hand: bool,
    pub two_finger_point: bool,
    /// Index and middle tips close together while pointing.
    pub fingers_together: bool,
    pub pinch: bool,
    pub pinky_pinch: bool,
    /// Pinch with middle, ring, and pinky folded.
    pub scroll_grip: bool,
}

/// Everything downstream stages need from one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSnapshot {
    pub fingers: FingerFlags,

    /// Pointer target in screen pixels, already kept off the edges.
    pub target: CursorPosition,

    /// Index tip to thumb tip distance (normalized).
    pub index_thumb: f64,

    /// Pinky tip to thumb tip distance (normalized).
    pub pinky_thumb: f64,

    /// Horizontal gap between index and middle tips (normalized).
    pub index_middle_gap: f64,

    /// Index tip minus thumb tip, used for scroll direction.
    pub scroll_delta: (f64, f64),
}

impl GestureSnapshot {
    pub fn signals(&self) -> GestureSignals {
        let pointing = self.fingers.two_finger_point();
        let pinch = self.index_thumb < PINCH_DISTANCE;
        GestureSignals {
            fist: self.fingers.all_down(),
            open_hand: self.fingers.all_up(),
            two_finger_point: pointing,
            fingers_together: pointing && self.index_middle_gap < DOUBLE_CLICK_SPREAD,
            pinch,
            pinky_pinch: self.pinky_thumb < PINCH_DISTANCE,
            scroll_grip: pinch && self.fingers.lower_three_down(),
        }
    }
}

/// Map the (mirrored) index fingertip onto screen pixels, before edge
/// clamping. The central `1 - 2 * FRAME_MARGIN` of the camera field spans
/// the full screen.
pub fn remap_to_screen(index_tip: Landmark, screen: ScreenSize) -> CursorPosition {
    let span = 1.0 - 2.0 * FRAME_MARGIN;
    CursorPosition::new(
        (1.0 - index_tip.x - FRAME_MARGIN) / span * screen.width as f64,
        (index_tip.y - FRAME_MARGIN) / span * screen.height as f64,
    )
}

/// Keep a target at least [`EDGE_MARGIN`] pixels inside the screen.
pub fn clamp_to_edges(target: CursorPosition, screen: ScreenSize) -> CursorPosition {
    CursorPosition::new(
        clamp(target.x, EDGE_MARGIN, screen.width as f64 - EDGE_MARGIN),
        clamp(target.y, EDGE_MARGIN, screen.height as f64 - EDGE_MARGIN),
    )
}

/// Stateless frame classifier bound to one screen geometry.
#[derive(Debug, Clone, Copy)]
pub struct GestureClassifier {
    screen: ScreenSize,
}

impl GestureClassifier {
    pub fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn finger_flags(hand: &HandLandmarks) -> FingerFlags {
        FingerFlags {
            index: finger_up(hand[INDEX_TIP], hand[INDEX_PIP]),
            middle: finger_up(hand[MIDDLE_TIP], hand[MIDDLE_PIP]),
            ring: finger_up(hand[RING_TIP], hand[RING_PIP]),
            pinky: finger_up(hand[PINKY_TIP], hand[PINKY_PIP]),
        }
    }

    pub fn classify(&self, hand: &HandLandmarks) -> GestureSnapshot {
        let thumb = hand.thumb_tip();
        let index = hand.index_tip();
        let middle = hand.middle_tip();

        GestureSnapshot {
            fingers: Self::finger_flags(hand),
            target: clamp_to_edges(remap_to_screen(index, self.screen), self.screen),
            index_thumb: distance(index, thumb),
            pinky_thumb: distance(hand.pinky_tip(), thumb),
            index_middle_gap: (index.x - middle.x).abs(),
            scroll_delta: (index.x - thumb.x, index.y - thumb.y),
        }
    }
}
