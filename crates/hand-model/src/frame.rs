//! Landmark stream wire format.
//!
//! Detector processes and recordings exchange one JSON object per line:
//!
//! ```text
//! # {"source":"camera0"}
//! {"t":0,"landmarks":[{"x":0.51,"y":0.62}, ... 21 points ...]}
//! {"t":33000000,"landmarks":null}
//! ```
//!
//! Every record carries its timestamp `t`. A missing or `null`
//! `landmarks` field means no hand was detected.
//! Lines starting with `#` and blank lines are ignored.

use serde::{Deserialize, Serialize};

use crate::landmark::{HandFrame, HandLandmarks};

/// Monotonic timestamp in nanoseconds since stream start.
pub type TimestampNs = u64;

/// One line of a landmark stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Capture time, nanoseconds since stream start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Landmarks of the first detected hand, if any.
    #[serde(default)]
    pub landmarks: Option<HandLandmarks>,
}

impl FrameRecord {
    pub fn present(timestamp_ns: TimestampNs, landmarks: HandLandmarks) -> Self {
        Self {
            timestamp_ns,
            landmarks: Some(landmarks),
        }
    }

    pub fn absent(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            landmarks: None,
        }
    }

    /// The hand observation carried by this record.
    pub fn frame(&self) -> HandFrame {
        match self.landmarks {
            Some(landmarks) => HandFrame::Present(landmarks),
            None => HandFrame::Absent,
        }
    }
}

/// A landmark stream line that could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct FrameParseError {
    /// 1-based line number.
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Whether a stream line carries no record.
pub fn is_skippable_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Decode a single non-skippable stream line.
pub fn parse_frame_line(line: &str) -> Result<FrameRecord, serde_json::Error> {
    serde_json::from_str(line.trim())
}

/// Parse a whole landmark stream (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<FrameRecord>, FrameParseError> {
    jsonl
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_skippable_line(line))
        .map(|(idx, line)| {
            parse_frame_line(line).map_err(|source| FrameParseError {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
