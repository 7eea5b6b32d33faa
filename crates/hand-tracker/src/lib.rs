//! GestureMouse Hand Tracker
//!
//! Sources of per-frame hand landmarks and sinks that record what the
//! gesture pipeline emitted. Landmark detection itself happens in an
//! external detector; this crate only speaks its line protocol:
//!
//! - **Detector:** Spawned subprocess printing landmark JSONL on stdout
//! - **JSONL:** Any reader of landmark JSONL (stdin, recordings)
//! - **Scripted:** In-memory frames for tests
//!
//! Emitted commands can be written to an append-only JSONL command log.

pub mod backends;
pub mod detector;
pub mod writer;

use gesturemouse_common::config::TrackerConfig;
use gesturemouse_common::error::GestureMouseResult;
use gesturemouse_platform_core::HandTracker;

pub use backends::{JsonlTracker, ScriptedStep, ScriptedTracker};
pub use detector::DetectorProcess;
pub use writer::CommandLog;

/// Open the tracker described by `config`: the detector subprocess when a
/// command is configured, otherwise landmark JSONL on stdin.
///
/// Failing to start the detector is fatal for the session.
pub fn open_tracker(config: &TrackerConfig) -> GestureMouseResult<Box<dyn HandTracker>> {
    match &config.detector_command {
        Some(command) => {
            let detector = DetectorProcess::spawn(command, config)?;
            tracing::info!(tracker = %detector.name(), "Using detector subprocess");
            Ok(Box::new(detector))
        }
        None => {
            tracing::info!("No detector configured, reading landmark frames from stdin");
            Ok(Box::new(JsonlTracker::stdin()))
        }
    }
}
