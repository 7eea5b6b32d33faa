//! The per-session control loop.

use gesturemouse_common::clock::{Clock, TimestampNs};
use gesturemouse_gesture_core::{DragState, FrameInterpreter};
use gesturemouse_hand_model::{HandFrame, PointerCommand};
use gesturemouse_platform_core::{HandTracker, PointerSink};

use crate::registry::ActiveFlag;

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Loop iterations that produced a frame (present or absent).
    pub frames: u64,
    pub hand_frames: u64,
    /// Commands accepted by the sink.
    pub commands: u64,
    pub tracker_errors: u64,
    pub output_errors: u64,
    pub safety_releases: u64,
    /// Frames that fell inside a double click pause.
    pub suppressed_frames: u64,
    /// Clock reading when the loop stopped.
    pub ended_at_ns: TimestampNs,
}

/// Sequential acquire → interpret → emit loop.
///
/// The loop owns the session state through its [`FrameInterpreter`].
/// Dropping it (normal exit, error, or unwinding panic) releases a held
/// drag with a `MouseUp` before the sink goes away.
pub struct FrameLoop {
    interpreter: FrameInterpreter,
    tracker: Box<dyn HandTracker>,
    sink: Box<dyn PointerSink>,
    clock: Box<dyn Clock>,
    active: ActiveFlag,
    summary: SessionSummary,
}

impl FrameLoop {
    pub fn new(
        interpreter: FrameInterpreter,
        tracker: Box<dyn HandTracker>,
        sink: Box<dyn PointerSink>,
        clock: Box<dyn Clock>,
        active: ActiveFlag,
    ) -> Self {
        Self {
            interpreter,
            tracker,
            sink,
            clock,
            active,
            summary: SessionSummary::default(),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.interpreter.drag_state()
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Run until the active flag clears or the tracker runs dry.
    pub fn run(&mut self) -> SessionSummary {
        tracing::info!(
            tracker = %self.tracker.name(),
            sink = %self.sink.name(),
            "Frame loop started"
        );

        while self.active.is_active() {
            if !self.step() {
                tracing::info!(tracker = %self.tracker.name(), "Tracker finished");
                break;
            }
        }

        self.release();
        self.summary.ended_at_ns = self.clock.now_ns();
        tracing::info!(
            frames = self.summary.frames,
            commands = self.summary.commands,
            tracker_errors = self.summary.tracker_errors,
            safety_releases = self.summary.safety_releases,
            "Frame loop stopped"
        );
        self.summary
    }

    /// One iteration. Returns `false` once the tracker is exhausted.
    pub fn step(&mut self) -> bool {
        let frame = match self.tracker.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                self.summary.tracker_errors += 1;
                tracing::warn!(error = %e, "Frame acquisition failed, treating as absent");
                HandFrame::Absent
            }
        };
        if self.tracker.is_finished() {
            return false;
        }

        let now = self.clock.now_ns();
        let outcome = self.interpreter.process(&frame, now);

        self.summary.frames += 1;
        if frame.is_present() {
            self.summary.hand_frames += 1;
        }
        if outcome.suppressed {
            self.summary.suppressed_frames += 1;
        }
        if outcome.safety_release {
            self.summary.safety_releases += 1;
        }
        if !outcome.commands.is_empty() {
            tracing::trace!(now, commands = ?outcome.commands, "Frame commands");
        }

        for command in &outcome.commands {
            self.emit(command);
        }
        true
    }

    fn emit(&mut self, command: &PointerCommand) {
        match self.sink.apply(command) {
            Ok(()) => self.summary.commands += 1,
            Err(e) => {
                self.summary.output_errors += 1;
                tracing::warn!(command = command.label(), error = %e, "Pointer command failed");
            }
        }
    }

    /// Force `Released`, emitting `MouseUp` if a drag was held.
    fn release(&mut self) {
        if let Some(command) = self.interpreter.finish() {
            self.emit(&command);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.release();
    }
}
