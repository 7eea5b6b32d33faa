//! Per-session frame interpretation.
//!
//! [`FrameInterpreter`] owns all state of one session (cursor estimate,
//! drag state, cooldown clock, last hand sighting) and turns each frame
//! into an ordered list of pointer commands:
//!
//! 1. classify the landmarks
//! 2. drag state machine
//! 3. dispatcher (move/double click, clicks, scroll)
//! 4. safety monitor, on every frame
//!
//! Steps 2 and 3 are skipped while a double click pause is running; the
//! safety monitor never is.

use gesturemouse_common::clock::TimestampNs;
use gesturemouse_hand_model::{HandFrame, PointerCommand};
use gesturemouse_platform_core::{CursorPosition, ScreenSize};

use crate::classifier::{GestureClassifier, GestureSnapshot};
use crate::dispatcher::EventDispatcher;
use crate::drag::{DragMachine, DragState};
use crate::safety::SafetyMonitor;
use crate::smoother::AdaptiveSmoother;

/// What one frame produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Commands in emission order.
    pub commands: Vec<PointerCommand>,

    /// Classification of the frame, when a hand was present.
    pub snapshot: Option<GestureSnapshot>,

    /// The frame fell inside a double click pause.
    pub suppressed: bool,

    /// The safety monitor released a drag on this frame.
    pub safety_release: bool,
}

/// Session state plus the fixed per-frame pipeline.
#[derive(Debug, Clone)]
pub struct FrameInterpreter {
    classifier: GestureClassifier,
    smoother: AdaptiveSmoother,
    drag: DragMachine,
    dispatcher: EventDispatcher,
    safety: SafetyMonitor,
}

impl FrameInterpreter {
    /// Fresh session state: released, no cooldowns, cursor at `initial_cursor`.
    pub fn new(screen: ScreenSize, initial_cursor: CursorPosition, start: TimestampNs) -> Self {
        Self {
            classifier: GestureClassifier::new(screen),
            smoother: AdaptiveSmoother::new(initial_cursor),
            drag: DragMachine::new(),
            dispatcher: EventDispatcher::new(),
            safety: SafetyMonitor::new(start),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn cursor(&self) -> CursorPosition {
        self.smoother.estimate()
    }

    pub fn screen(&self) -> ScreenSize {
        self.classifier.screen()
    }

    pub fn safety(&self) -> &SafetyMonitor {
        &self.safety
    }

    /// Interpret one frame observed at `now`.
    pub fn process(&mut self, frame: &HandFrame, now: TimestampNs) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        if let HandFrame::Present(hand) = frame {
            self.safety.hand_seen(now);
            let snapshot = self.classifier.classify(hand);
            outcome.snapshot = Some(snapshot);

            if self.dispatcher.is_suppressed(now) {
                outcome.suppressed = true;
            } else {
                if let Some(command) = self.drag.evaluate(&snapshot.fingers) {
                    outcome.commands.push(command);
                }
                self.dispatcher
                    .dispatch(&snapshot, now, &mut self.smoother, &mut outcome.commands);
            }
        }

        if let Some(command) = self.safety.check(now, &mut self.drag) {
            outcome.commands.push(command);
            outcome.safety_release = true;
        }

        outcome
    }

    /// End of session: release any held drag.
    pub fn finish(&mut self) -> Option<PointerCommand> {
        let command = self.drag.force_release();
        if command.is_some() {
            tracing::info!("Releasing drag at session end");
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FingerFlags;
    use gesturemouse_hand_model::{
        HandLandmarks, Landmark, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, THUMB_TIP,
    };

    #[test]
    fn absent_frames_only_run_safety() {
        let mut interp = FrameInterpreter::new(ScreenSize::default(), CursorPosition::default(), 0);
        let outcome = interp.process(&HandFrame::Absent, 1_000_000_000);
        assert!(outcome.commands.is_empty());
        assert!(outcome.snapshot.is_none());
        assert_eq!(interp.safety().last_hand_seen(), 0);
    }

    #[test]
    fn present_frame_updates_last_sighting() {
        let mut interp = FrameInterpreter::new(ScreenSize::default(), CursorPosition::default(), 0);
        let outcome = interp.process(&HandFrame::Present(HandLandmarks::default()), 7);
        assert_eq!(interp.safety().last_hand_seen(), 7);
        // all-zero landmarks: a fist with every tip on the thumb
        assert_eq!(outcome.snapshot.map(|s| s.fingers), Some(FingerFlags::default()));
        assert_eq!(outcome.commands.first(), Some(&PointerCommand::MouseDown));
        assert!(outcome.commands.contains(&PointerCommand::Click));
        assert_eq!(interp.finish(), Some(PointerCommand::MouseUp));
        assert_eq!(interp.finish(), None);
    }

    #[test]
    fn pointing_moves_cursor_estimate() {
        let hand = HandLandmarks::default()
            .with(THUMB_TIP, Landmark::new(0.9, 0.9))
            .with(INDEX_TIP, Landmark::new(0.3, 0.3))
            .with(INDEX_PIP, Landmark::new(0.3, 0.5))
            .with(MIDDLE_TIP, Landmark::new(0.4, 0.3))
            .with(MIDDLE_PIP, Landmark::new(0.4, 0.5));
        let start = CursorPosition::new(960.0, 540.0);
        let mut interp = FrameInterpreter::new(ScreenSize::default(), start, 0);

        let outcome = interp.process(&HandFrame::Present(hand), 1);
        assert!(matches!(
            outcome.commands.as_slice(),
            [PointerCommand::MoveTo { .. }]
        ));
        assert_ne!(interp.cursor(), start);
    }
}
