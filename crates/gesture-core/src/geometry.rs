//! Landmark geometry helpers.

use gesturemouse_hand_model::Landmark;

/// Euclidean distance in normalized landmark space.
pub fn distance(a: Landmark, b: Landmark) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Clamp `v` into `[lo, hi]`. The result is unspecified when `lo > hi`,
/// but it never panics.
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// A finger counts as extended when its tip sits above its PIP joint.
pub fn finger_up(tip: Landmark, pip: Landmark) -> bool {
    tip.y < pip.y
}
