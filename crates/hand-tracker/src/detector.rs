//! External landmark detector subprocess.
//!
//! The detector owns the camera and the landmark model. It is started
//! with the configured camera settings appended to its command line, must
//! print `READY` once initialized, and then writes one landmark JSONL
//! record per processed camera frame to stdout.

use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};

use gesturemouse_common::config::TrackerConfig;
use gesturemouse_common::error::{GestureMouseError, GestureMouseResult};
use gesturemouse_hand_model::HandFrame;
use gesturemouse_platform_core::HandTracker;

use crate::backends::JsonlTracker;

const READY_SIGNAL: &str = "READY";

pub struct DetectorProcess {
    child: Child,
    frames: JsonlTracker<BufReader<ChildStdout>>,
}

impl DetectorProcess {
    /// Start the detector and wait for its ready line.
    pub fn spawn(command: &[String], config: &TrackerConfig) -> GestureMouseResult<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| GestureMouseError::config("detector command is empty"))?;

        tracing::info!(program = %program, camera = config.camera_index, "Starting landmark detector");

        let mut child = Command::new(program)
            .args(args)
            .args(config.detector_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                GestureMouseError::tracker(format!("Failed to start detector {program}: {e}"))
            })?;

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                return Err(GestureMouseError::tracker("Detector stdout was not captured"));
            }
        };
        let mut reader = BufReader::new(stdout);

        let mut ready = String::new();
        let handshake = reader.read_line(&mut ready);
        if !matches!(handshake, Ok(n) if n > 0 && ready.trim() == READY_SIGNAL) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(GestureMouseError::tracker(format!(
                "Detector did not signal {READY_SIGNAL}, got {:?}",
                ready.trim()
            )));
        }

        tracing::info!("Landmark detector ready");

        Ok(Self {
            child,
            frames: JsonlTracker::new(reader, format!("detector:{program}")),
        })
    }
}

impl HandTracker for DetectorProcess {
    fn next_frame(&mut self) -> GestureMouseResult<HandFrame> {
        self.frames.next_frame()
    }

    fn name(&self) -> &str {
        self.frames.name()
    }

    fn is_finished(&self) -> bool {
        self.frames.is_finished()
    }
}

impl Drop for DetectorProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        // the detector args land in $0.. and are ignored by the script
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn missing_program_is_a_setup_failure() {
        let command = vec!["/nonexistent/gesturemouse-detector".to_string()];
        let err = DetectorProcess::spawn(&command, &TrackerConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, GestureMouseError::Tracker { .. }));
    }

    #[test]
    fn detector_without_ready_line_is_rejected() {
        let result = DetectorProcess::spawn(&sh("echo booting"), &TrackerConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn reads_frames_after_ready() {
        let script = r#"echo READY; echo '{"t":0}'; echo '{"t":1,"landmarks":null}'"#;
        let mut detector = DetectorProcess::spawn(&sh(script), &TrackerConfig::default()).unwrap();

        assert_eq!(detector.next_frame().unwrap(), HandFrame::Absent);
        assert_eq!(detector.next_frame().unwrap(), HandFrame::Absent);
        assert!(!detector.is_finished());
        detector.next_frame().unwrap();
        assert!(detector.is_finished());
        assert!(detector.name().starts_with("detector:"));
    }

    #[test]
    fn empty_command_is_a_config_error() {
        let err = DetectorProcess::spawn(&[], &TrackerConfig::default()).err().unwrap();
        assert!(matches!(err, GestureMouseError::Config { .. }));
    }
}
