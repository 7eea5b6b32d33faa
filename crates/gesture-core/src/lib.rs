//! GestureMouse Gesture Core: the per-frame interpreter
//!
//! Turns one frame of hand landmarks into pointer commands:
//! - **Classification:** Finger postures, pinch distances, and the
//!   screen-space pointer target derived from the index fingertip
//! - **Smoothing:** Velocity-aware adaptive exponential cursor update
//! - **Drag:** Fist/open-hand driven press-and-hold state machine
//! - **Dispatch:** Cooldown-gated clicks, double clicks, and scrolling
//! - **Safety:** Forced drag release when tracking is lost
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! Time is always passed in; all outputs are data.

pub mod classifier;
pub mod dispatcher;
pub mod drag;
pub mod geometry;
pub mod interpreter;
pub mod safety;
pub mod smoother;

pub use classifier::{FingerFlags, GestureClassifier, GestureSignals, GestureSnapshot};
pub use dispatcher::{ActionKind, CooldownClock, EventDispatcher};
pub use drag::{DragMachine, DragState};
pub use interpreter::{FrameInterpreter, FrameOutcome};
pub use safety::SafetyMonitor;
pub use smoother::AdaptiveSmoother;
