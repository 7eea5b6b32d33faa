//! GestureMouse platform core contracts.
//!
//! The gesture pipeline talks to the outside world through three small
//! interfaces defined here, so the core never couples to a concrete
//! camera, detector, or OS input backend:
//!
//! - [`HandTracker`]: produces one [`HandFrame`] per loop iteration
//! - [`DisplayGeometry`]: screen size and pointer position at session start
//! - [`PointerSink`]: receives fire-and-forget [`PointerCommand`]s

use serde::{Deserialize, Serialize};

use gesturemouse_common::error::GestureMouseResult;
use gesturemouse_hand_model::{HandFrame, PointerCommand};

/// Screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
}

impl CursorPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Clamp a position into the visible pixel grid of `screen`.
pub fn clamp_to_screen(position: CursorPosition, screen: ScreenSize) -> CursorPosition {
    let max_x = f64::from(screen.width.saturating_sub(1));
    let max_y = f64::from(screen.height.saturating_sub(1));
    CursorPosition::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Source of hand observations.
pub trait HandTracker: Send {
    /// Acquire the next frame. An error is a failed acquisition for this
    /// iteration only; the caller decides how to continue.
    fn next_frame(&mut self) -> GestureMouseResult<HandFrame>;

    /// Tracker name for logging.
    fn name(&self) -> &str;

    /// Whether the frame source is exhausted (finite recordings).
    fn is_finished(&self) -> bool {
        false
    }
}

/// Screen geometry queries, made once at session start.
pub trait DisplayGeometry {
    fn screen_size(&self) -> GestureMouseResult<ScreenSize>;

    fn cursor_position(&self) -> GestureMouseResult<CursorPosition>;
}

/// Receiver of pointer commands.
///
/// Implementors only need [`PointerSink::apply`]; the named helpers
/// mirror the device operations and forward to it.
pub trait PointerSink: Send {
    fn apply(&mut self, command: &PointerCommand) -> GestureMouseResult<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    fn move_to(&mut self, x: i32, y: i32) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::MoveTo { x, y })
    }

    fn mouse_down(&mut self) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::MouseDown)
    }

    fn mouse_up(&mut self) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::MouseUp)
    }

    fn click(&mut self) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::Click)
    }

    fn double_click(&mut self) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::DoubleClick)
    }

    fn right_click(&mut self) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::RightClick)
    }

    fn scroll(&mut self, amount: i32) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::Scroll { amount })
    }

    fn hscroll(&mut self, amount: i32) -> GestureMouseResult<()> {
        self.apply(&PointerCommand::HScroll { amount })
    }
}

impl<S: PointerSink + ?Sized> PointerSink for Box<S> {
    fn apply(&mut self, command: &PointerCommand) -> GestureMouseResult<()> {
        (**self).apply(command)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: HandTracker + ?Sized> HandTracker for Box<T> {
    fn next_frame(&mut self) -> GestureMouseResult<HandFrame> {
        (**self).next_frame()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}

/// A display with fixed geometry, for replays and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDisplay {
    pub size: ScreenSize,
    pub cursor: CursorPosition,
}

impl StaticDisplay {
    /// A display of the given size with the pointer at its center.
    pub fn centered(size: ScreenSize) -> Self {
        Self {
            size,
            cursor: CursorPosition::new(size.width as f64 / 2.0, size.height as f64 / 2.0),
        }
    }
}

impl DisplayGeometry for StaticDisplay {
    fn screen_size(&self) -> GestureMouseResult<ScreenSize> {
        Ok(self.size)
    }

    fn cursor_position(&self) -> GestureMouseResult<CursorPosition> {
        Ok(self.cursor)
    }
}
