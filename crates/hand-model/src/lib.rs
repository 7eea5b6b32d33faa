//! GestureMouse Hand Model
//!
//! Defines the data contracts shared by the tracker, the gesture pipeline
//! and the output backends:
//! - **Landmarks:** The 21 tracked hand points of one frame
//! - **Frames:** Per-iteration `Present`/`Absent` hand observations and
//!   their JSONL wire format
//! - **Commands:** Abstract pointer commands emitted to the output sink
//!
//! Landmark coordinates are normalized to `[0.0, 1.0]` and mirrored
//! horizontally relative to raw camera space; smaller `y` is higher.

pub mod command;
pub mod frame;
pub mod landmark;

pub use command::*;
pub use frame::*;
pub use landmark::*;
