//! Fist-to-drag state machine.
//!
//! A fist presses the primary button, an open hand releases it. Any other
//! hand shape leaves the state alone, so partially curled fingers cannot
//! make a drag flicker on and off.

use gesturemouse_hand_model::PointerCommand;

use crate::classifier::FingerFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Released,
    Dragging,
}

#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Apply one frame's finger posture. Returns the button command for a
    /// transition, or `None` when the state is unchanged.
    pub fn evaluate(&mut self, fingers: &FingerFlags) -> Option<PointerCommand> {
        match self.state {
            DragState::Released if fingers.all_down() => {
                self.state = DragState::Dragging;
                tracing::info!("Drag started");
                Some(PointerCommand::MouseDown)
            }
            DragState::Dragging if fingers.all_up() => {
                self.state = DragState::Released;
                tracing::info!("Drag released by open hand");
                Some(PointerCommand::MouseUp)
            }
            _ => None,
        }
    }

    /// Release regardless of posture (tracking loss, session end).
    pub fn force_release(&mut self) -> Option<PointerCommand> {
        if self.is_dragging() {
            self.state = DragState::Released;
            Some(PointerCommand::MouseUp)
        } else {
            None
        }
    }
}
