//! GestureMouse session orchestration.
//!
//! A session is one enable/disable cycle of gesture control:
//! - [`SessionController`] validates and starts a session on a blocking worker
//! - [`FrameLoop`] is that worker: acquire, interpret, emit, repeat
//! - [`SessionRegistry`] keeps at most one session active per process

pub mod controller;
pub mod frame_loop;
pub mod registry;

pub use controller::{SessionController, SessionState};
pub use frame_loop::{FrameLoop, SessionSummary};
pub use registry::{ActiveFlag, SessionLease, SessionRegistry};
