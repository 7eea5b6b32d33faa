//! Display server detection.

/// Detect the current display server.
pub fn detect_display_server() -> DisplayServer {
    if std::env::var("WAYLAND_DISPLAY").is_ok() {
        DisplayServer::Wayland
    } else if std::env::var("DISPLAY").is_ok() {
        DisplayServer::X11
    } else {
        DisplayServer::Unknown
    }
}

/// Display server type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
    Unknown,
}

impl DisplayServer {
    /// Whether `xdotool` can inject pointer input into this session.
    ///
    /// Under Wayland this only reaches XWayland clients.
    pub fn supports_xdotool(&self) -> bool {
        matches!(self, DisplayServer::X11 | DisplayServer::Wayland)
    }
}
