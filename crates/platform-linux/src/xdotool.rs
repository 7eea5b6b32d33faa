//! Pointer output and screen queries through the `xdotool` command.

use std::process::Command;

use gesturemouse_common::error::{GestureMouseError, GestureMouseResult};
use gesturemouse_hand_model::PointerCommand;
use gesturemouse_platform_core::{CursorPosition, DisplayGeometry, PointerSink, ScreenSize};

const LEFT_BUTTON: &str = "1";
const RIGHT_BUTTON: &str = "3";
const WHEEL_UP: &str = "4";
const WHEEL_DOWN: &str = "5";
const WHEEL_LEFT: &str = "6";
const WHEEL_RIGHT: &str = "7";

/// X11 (or XWayland) pointer backend driven by `xdotool`.
#[derive(Debug, Clone)]
pub struct XdotoolBackend {
    program: String,
}

impl Default for XdotoolBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl XdotoolBackend {
    pub fn new() -> Self {
        Self {
            program: "xdotool".to_string(),
        }
    }

    /// Whether the `xdotool` binary can be executed.
    pub fn is_available() -> bool {
        Command::new("xdotool")
            .arg("version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn run(&self, args: &[String]) -> GestureMouseResult<String> {
        tracing::trace!(program = %self.program, args = %args.join(" "), "Running xdotool");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| GestureMouseError::output(format!("Failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            tracing::warn!(
                args = %args.join(" "),
                status = %output.status,
                "xdotool exited with error"
            );
            return Err(GestureMouseError::output(format!(
                "{} {} exited with {}: {}",
                self.program,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `xdotool` arguments for a command. `None` for commands with no
/// visible effect (zero-amount scrolls).
pub fn command_args(command: &PointerCommand) -> Option<Vec<String>> {
    let args: Vec<&str> = match command {
        PointerCommand::MoveTo { x, y } => {
            return Some(vec![
                "mousemove".to_string(),
                "--sync".to_string(),
                x.to_string(),
                y.to_string(),
            ])
        }
        PointerCommand::MouseDown => vec!["mousedown", LEFT_BUTTON],
        PointerCommand::MouseUp => vec!["mouseup", LEFT_BUTTON],
        PointerCommand::Click => vec!["click", LEFT_BUTTON],
        PointerCommand::DoubleClick => vec!["click", "--repeat", "2", LEFT_BUTTON],
        PointerCommand::RightClick => vec!["click", RIGHT_BUTTON],
        PointerCommand::Scroll { amount } => {
            let button = if *amount > 0 { WHEEL_UP } else { WHEEL_DOWN };
            return wheel_args(*amount, button);
        }
        PointerCommand::HScroll { amount } => {
            let button = if *amount > 0 { WHEEL_RIGHT } else { WHEEL_LEFT };
            return wheel_args(*amount, button);
        }
    };
    Some(args.into_iter().map(str::to_string).collect())
}

fn wheel_args(amount: i32, button: &str) -> Option<Vec<String>> {
    if amount == 0 {
        return None;
    }
    Some(vec![
        "click".to_string(),
        "--repeat".to_string(),
        amount.unsigned_abs().to_string(),
        button.to_string(),
    ])
}

/// Parse `xdotool getdisplaygeometry` output (`"<width> <height>"`).
pub fn parse_display_geometry(output: &str) -> Option<ScreenSize> {
    let mut parts = output.split_whitespace();
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    Some(ScreenSize::new(width, height))
}

/// Parse `xdotool getmouselocation --shell` output (`X=..` / `Y=..` lines).
pub fn parse_mouse_location(output: &str) -> Option<CursorPosition> {
    let mut x = None;
    let mut y = None;
    for line in output.lines() {
        match line.trim().split_once('=') {
            Some(("X", value)) => x = value.parse::<f64>().ok(),
            Some(("Y", value)) => y = value.parse::<f64>().ok(),
            _ => {}
        }
    }
    Some(CursorPosition::new(x?, y?))
}

impl PointerSink for XdotoolBackend {
    fn apply(&mut self, command: &PointerCommand) -> GestureMouseResult<()> {
        if let Some(args) = command_args(command) {
            self.run(&args)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "xdotool"
    }
}

impl DisplayGeometry for XdotoolBackend {
    fn screen_size(&self) -> GestureMouseResult<ScreenSize> {
        let output = self.run(&["getdisplaygeometry".to_string()])?;
        parse_display_geometry(&output).ok_or_else(|| {
            GestureMouseError::display(format!("Unexpected display geometry: {output:?}"))
        })
    }

    fn cursor_position(&self) -> GestureMouseResult<CursorPosition> {
        let output = self.run(&["getmouselocation".to_string(), "--shell".to_string()])?;
        parse_mouse_location(&output).ok_or_else(|| {
            GestureMouseError::display(format!("Unexpected mouse location: {output:?}"))
        })
    }
}
