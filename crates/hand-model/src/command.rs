//! Abstract pointer commands produced by the gesture pipeline.

use serde::{Deserialize, Serialize};

use crate::frame::TimestampNs;

/// A fire-and-forget command for the pointer output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerCommand {
    /// Move the pointer to absolute screen pixels.
    MoveTo { x: i32, y: i32 },
    /// Press the primary button (drag start).
    MouseDown,
    /// Release the primary button (drag end).
    MouseUp,
    /// Primary click.
    Click,
    /// Primary double click.
    DoubleClick,
    /// Secondary click.
    RightClick,
    /// Vertical scroll; positive scrolls up.
    Scroll { amount: i32 },
    /// Horizontal scroll; positive scrolls right.
    #[serde(rename = "hscroll")]
    HScroll { amount: i32 },
}

impl PointerCommand {
    /// Short label used in logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            PointerCommand::MoveTo { .. } => "move",
            PointerCommand::MouseDown => "mouse_down",
            PointerCommand::MouseUp => "mouse_up",
            PointerCommand::Click => "click",
            PointerCommand::DoubleClick => "double_click",
            PointerCommand::RightClick => "right_click",
            PointerCommand::Scroll { .. } => "scroll",
            PointerCommand::HScroll { .. } => "hscroll",
        }
    }

    /// Whether this is a discrete action rather than a pointer move.
    pub fn is_action(&self) -> bool {
        !matches!(self, PointerCommand::MoveTo { .. })
    }
}

/// A command with the time it was emitted, as written to command logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Monotonic nanoseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    #[serde(flatten)]
    pub command: PointerCommand,
}

/// Current command log schema version.
pub const COMMAND_LOG_SCHEMA_VERSION: &str = "1.0";

/// Metadata written as the first (comment) line of a command log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandLogHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (RFC 3339).
    pub epoch_wall: String,

    /// Screen dimensions the session mapped onto.
    pub screen_width: u32,
    pub screen_height: u32,
}

impl CommandLogHeader {
    pub fn new(epoch_wall: impl Into<String>, screen_width: u32, screen_height: u32) -> Self {
        Self {
            schema_version: COMMAND_LOG_SCHEMA_VERSION.to_string(),
            epoch_wall: epoch_wall.into(),
            screen_width,
            screen_height,
        }
    }
}

/// Parse commands from JSONL content (one JSON object per line).
pub fn parse_commands(jsonl: &str) -> Result<Vec<CommandRecord>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
