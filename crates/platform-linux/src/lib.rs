//! GestureMouse Linux Platform Integration
//!
//! Platform-specific implementations for Linux:
//! - **Display Detection:** Display server and screen geometry
//! - **Pointer Output:** Command injection through `xdotool`
//! - **Permissions:** Capability detection and user guidance

pub mod display;
pub mod permissions;
pub mod xdotool;

pub use display::*;
pub use xdotool::XdotoolBackend;
