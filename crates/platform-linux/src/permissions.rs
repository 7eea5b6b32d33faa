//! Capability detection and guidance for Linux.
//!
//! GestureMouse needs a graphical session that `xdotool` can drive, a
//! camera, and an external landmark detector.

use std::path::Path;

use gesturemouse_common::config::AppConfig;

use crate::display::{detect_display_server, DisplayServer};
use crate::xdotool::XdotoolBackend;

/// A system capability that GestureMouse may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all capabilities and report status.
pub fn check_capabilities(config: &AppConfig) -> Vec<Capability> {
    let capabilities = vec![
        check_display_session(),
        check_xdotool(),
        check_webcam_access(),
        check_detector(config),
    ];
    for cap in &capabilities {
        tracing::debug!(
            capability = %cap.name,
            available = cap.available,
            required = cap.required,
            "Capability checked"
        );
    }
    capabilities
}

/// Whether every required capability is available.
pub fn all_required_available(capabilities: &[Capability]) -> bool {
    capabilities.iter().all(|c| c.available || !c.required)
}

fn check_display_session() -> Capability {
    let server = detect_display_server();
    let available = server.supports_xdotool();

    Capability {
        name: "Display Session".to_string(),
        description: format!("Graphical session for pointer injection ({server:?})"),
        available,
        required: true,
        fix_instructions: match server {
            DisplayServer::Unknown => Some(
                "Run from a graphical desktop session (DISPLAY or WAYLAND_DISPLAY must be set)"
                    .to_string(),
            ),
            DisplayServer::Wayland => Some(
                "Wayland detected: pointer input only reaches XWayland windows; log into an X11 session for full control"
                    .to_string(),
            ),
            DisplayServer::X11 => None,
        },
    }
}

fn check_xdotool() -> Capability {
    let available = XdotoolBackend::is_available();

    Capability {
        name: "xdotool".to_string(),
        description: "Pointer movement, clicks and scrolling".to_string(),
        available,
        required: true,
        fix_instructions: if available {
            None
        } else {
            Some("Install xdotool: sudo apt install xdotool".to_string())
        },
    }
}

fn check_webcam_access() -> Capability {
    let has_webcam = (0..16)
        .map(|idx| format!("/dev/video{idx}"))
        .any(|path| Path::new(&path).exists());

    Capability {
        name: "Webcam Device".to_string(),
        description: "Video4Linux camera feeding the landmark detector".to_string(),
        available: has_webcam,
        required: false,
        fix_instructions: if has_webcam {
            None
        } else {
            Some(
                "Connect a webcam and verify /dev/video* exists (v4l2-ctl --list-devices)"
                    .to_string(),
            )
        },
    }
}

fn check_detector(config: &AppConfig) -> Capability {
    let configured = config
        .tracker
        .detector_command
        .as_ref()
        .is_some_and(|cmd| !cmd.is_empty());

    Capability {
        name: "Landmark Detector".to_string(),
        description: "External process emitting hand landmark JSONL".to_string(),
        available: configured,
        required: false,
        fix_instructions: if configured {
            None
        } else {
            Some(
                "Set tracker.detector_command in the config file or pass it after `gesturemouse run --`; without it frames are read from stdin"
                    .to_string(),
            )
        },
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("GestureMouse System Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}
