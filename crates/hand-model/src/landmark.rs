//! Hand landmark types.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Number of landmarks reported per hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// A single normalized hand point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X coordinate [0.0, 1.0], mirrored.
    pub x: f64,
    /// Normalized Y coordinate [0.0, 1.0]; smaller is higher.
    pub y: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The full landmark set of one detected hand.
///
/// Deserializing rejects any array that does not hold exactly
/// [`LANDMARK_COUNT`] points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandLandmarks([Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    /// Return a copy with one landmark replaced.
    pub fn with(mut self, index: usize, landmark: Landmark) -> Self {
        self.0[index] = landmark;
        self
    }

    pub fn thumb_tip(&self) -> Landmark {
        self.0[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Landmark {
        self.0[INDEX_TIP]
    }

    pub fn middle_tip(&self) -> Landmark {
        self.0[MIDDLE_TIP]
    }

    pub fn pinky_tip(&self) -> Landmark {
        self.0[PINKY_TIP]
    }
}

impl Index<usize> for HandLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.0[index]
    }
}

/// One loop iteration's hand observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandFrame {
    /// A hand was detected.
    Present(HandLandmarks),
    /// No hand in view.
    Absent,
}

impl HandFrame {
    pub fn is_present(&self) -> bool {
        matches!(self, HandFrame::Present(_))
    }
}
