//! Session lifecycle: validate, start on a blocking worker, stop.

use gesturemouse_common::clock::Clock;
use gesturemouse_common::error::{GestureMouseError, GestureMouseResult};
use gesturemouse_gesture_core::FrameInterpreter;
use gesturemouse_platform_core::{clamp_to_screen, DisplayGeometry, HandTracker, PointerSink};
use tokio::task::JoinHandle;

use crate::frame_loop::{FrameLoop, SessionSummary};
use crate::registry::{ActiveFlag, SessionRegistry};

/// State of a session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session started yet.
    Idle,
    /// Frame loop running.
    Running,
    /// Loop ended and summary collected.
    Stopped,
}

/// Supervises one frame loop at a time.
pub struct SessionController {
    registry: SessionRegistry,
    state: SessionState,
    active: Option<ActiveFlag>,
    task: Option<JoinHandle<SessionSummary>>,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    /// Controller bound to the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(SessionRegistry::global().clone())
    }

    pub fn with_registry(registry: SessionRegistry) -> Self {
        Self {
            registry,
            state: SessionState::Idle,
            active: None,
            task: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the frame loop is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop flag of the running session, for signal handlers.
    pub fn active_flag(&self) -> Option<ActiveFlag> {
        self.active.clone()
    }

    /// Start a session.
    ///
    /// Queries the display once, seeds the cursor estimate from the
    /// current pointer position, and runs the frame loop on a blocking
    /// worker. Fails with [`GestureMouseError::SessionAlreadyActive`]
    /// while any session in the same registry is running; setup failures
    /// leave nothing held.
    pub async fn start(
        &mut self,
        tracker: Box<dyn HandTracker>,
        display: &dyn DisplayGeometry,
        sink: Box<dyn PointerSink>,
        clock: Box<dyn Clock>,
    ) -> GestureMouseResult<()> {
        if self.is_running() {
            return Err(GestureMouseError::SessionAlreadyActive);
        }
        let lease = self.registry.acquire()?;

        let screen = display.screen_size()?;
        if screen.width == 0 || screen.height == 0 {
            return Err(GestureMouseError::display(format!(
                "Invalid screen size {}x{}",
                screen.width, screen.height
            )));
        }
        let cursor = clamp_to_screen(display.cursor_position()?, screen);

        tracing::info!(
            tracker = %tracker.name(),
            sink = %sink.name(),
            width = screen.width,
            height = screen.height,
            "Starting gesture session"
        );

        let active = ActiveFlag::new();
        let interpreter = FrameInterpreter::new(screen, cursor, clock.now_ns());
        let mut frame_loop = FrameLoop::new(interpreter, tracker, sink, clock, active.clone());

        self.task = Some(tokio::task::spawn_blocking(move || {
            let _lease = lease;
            frame_loop.run()
        }));
        self.active = Some(active);
        self.state = SessionState::Running;
        Ok(())
    }

    /// Request a stop and wait for the loop to finish.
    pub async fn stop(&mut self) -> GestureMouseResult<SessionSummary> {
        if let Some(active) = &self.active {
            tracing::info!("Stopping gesture session");
            active.stop();
        }
        self.join().await
    }

    /// Wait for the loop to end on its own (finite trackers).
    pub async fn wait(&mut self) -> GestureMouseResult<SessionSummary> {
        self.join().await
    }

    async fn join(&mut self) -> GestureMouseResult<SessionSummary> {
        let handle = self
            .task
            .take()
            .ok_or_else(|| GestureMouseError::session("No session running"))?;
        self.active = None;
        self.state = SessionState::Stopped;

        let summary = handle
            .await
            .map_err(|e| GestureMouseError::session(format!("Frame loop failed: {e}")))?;
        tracing::info!(
            frames = summary.frames,
            commands = summary.commands,
            "Gesture session stopped"
        );
        Ok(summary)
    }
}

impl Drop for SessionController {
    /// Signal a still-running loop to stop. The worker then releases any
    /// held drag and its lease on its own.
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::info!("Session controller dropped, stopping frame loop");
            active.stop();
        }
    }
}
