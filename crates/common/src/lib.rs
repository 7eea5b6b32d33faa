//! GestureMouse Common Utilities
//!
//! Shared infrastructure for all GestureMouse crates:
//! - Error types and result aliases
//! - Monotonic and manual clocks for frame timestamps
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
