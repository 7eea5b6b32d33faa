//! Landmark frame sources.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::time::{Duration, Instant};

use gesturemouse_common::clock::{ManualClock, TimestampNs};
use gesturemouse_common::error::{GestureMouseError, GestureMouseResult};
use gesturemouse_hand_model::frame::{is_skippable_line, parse_frame_line};
use gesturemouse_hand_model::HandFrame;
use gesturemouse_platform_core::HandTracker;

/// Reads landmark JSONL records from any buffered reader.
///
/// A malformed line is reported as an error for that call only; the next
/// call continues with the following line. End of input marks the
/// tracker finished.
pub struct JsonlTracker<R> {
    reader: R,
    name: String,
    line_no: usize,
    finished: bool,
    realtime: bool,
    /// Wall instant and record timestamp of the first paced record.
    pace_anchor: Option<(Instant, TimestampNs)>,
    clock: Option<ManualClock>,
}

impl<R: BufRead + Send> JsonlTracker<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line_no: 0,
            finished: false,
            realtime: false,
            pace_anchor: None,
            clock: None,
        }
    }

    /// Deliver records no faster than their recorded timestamps.
    pub fn realtime(mut self) -> Self {
        self.realtime = true;
        self
    }

    /// Set `clock` to each record's timestamp as it is delivered.
    pub fn driving_clock(mut self, clock: ManualClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Lines consumed so far (including comments and blanks).
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    fn pace(&mut self, timestamp_ns: TimestampNs) {
        if !self.realtime {
            return;
        }
        let (start, first_ns) = *self
            .pace_anchor
            .get_or_insert_with(|| (Instant::now(), timestamp_ns));
        let due = start + Duration::from_nanos(timestamp_ns.saturating_sub(first_ns));
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
    }
}

impl JsonlTracker<BufReader<std::io::Stdin>> {
    /// Landmark frames piped on stdin.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()), "stdin")
    }
}

impl<R: BufRead + Send> HandTracker for JsonlTracker<R> {
    fn next_frame(&mut self) -> GestureMouseResult<HandFrame> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.finished || self.reader.read_line(&mut line)? == 0 {
                if !self.finished {
                    tracing::debug!(tracker = %self.name, lines = self.line_no, "End of landmark stream");
                }
                self.finished = true;
                return Ok(HandFrame::Absent);
            }
            self.line_no += 1;

            if is_skippable_line(&line) {
                continue;
            }

            let record = parse_frame_line(&line).map_err(|e| {
                GestureMouseError::tracker(format!(
                    "{}: bad landmark record on line {}: {e}",
                    self.name, self.line_no
                ))
            })?;

            self.pace(record.timestamp_ns);
            if let Some(clock) = &self.clock {
                clock.set(record.timestamp_ns);
            }
            return Ok(record.frame());
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// One scripted tracker result.
#[derive(Debug, Clone)]
pub enum ScriptedStep {
    Frame(HandFrame),
    /// A failed acquisition.
    Fail,
}

/// Tracker replaying a fixed script, for tests and demos.
pub struct ScriptedTracker {
    steps: VecDeque<ScriptedStep>,
    clock: Option<(ManualClock, Duration)>,
    endless_absent: bool,
    finished: bool,
}

impl ScriptedTracker {
    pub fn new(frames: impl IntoIterator<Item = HandFrame>) -> Self {
        Self::from_steps(frames.into_iter().map(ScriptedStep::Frame))
    }

    pub fn from_steps(steps: impl IntoIterator<Item = ScriptedStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            clock: None,
            endless_absent: false,
            finished: false,
        }
    }

    /// Advance `clock` by `interval` before every step.
    pub fn with_clock(mut self, clock: ManualClock, interval: Duration) -> Self {
        self.clock = Some((clock, interval));
        self
    }

    /// Keep reporting `Absent` once the script runs out instead of finishing.
    pub fn then_absent_forever(mut self) -> Self {
        self.endless_absent = true;
        self
    }
}

impl HandTracker for ScriptedTracker {
    fn next_frame(&mut self) -> GestureMouseResult<HandFrame> {
        if let Some((clock, interval)) = &self.clock {
            clock.advance(*interval);
        }
        match self.steps.pop_front() {
            Some(ScriptedStep::Frame(frame)) => Ok(frame),
            Some(ScriptedStep::Fail) => Err(GestureMouseError::tracker("scripted failure")),
            None => {
                if !self.endless_absent {
                    self.finished = true;
                }
                Ok(HandFrame::Absent)
            }
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesturemouse_common::clock::Clock;
    use gesturemouse_hand_model::{FrameRecord, HandLandmarks};
    use std::io::Cursor;

    fn stream() -> String {
        let present = serde_json::to_string(&FrameRecord::present(
            16_000_000,
            HandLandmarks::default(),
        ))
        .unwrap();
        format!("# recorded\n\n{present}\n{{\"t\":32000000,\"landmarks\":[]}}\n{{\"t\":48000000}}\n")
    }

    #[test]
    fn jsonl_tracker_skips_comments_and_reports_bad_lines() {
        let clock = ManualClock::new(0);
        let mut tracker =
            JsonlTracker::new(Cursor::new(stream()), "test").driving_clock(clock.clone());

        assert!(tracker.next_frame().unwrap().is_present());
        assert_eq!(clock.now_ns(), 16_000_000);

        let err = tracker.next_frame().unwrap_err();
        assert!(err.to_string().contains("line 4"));

        assert_eq!(tracker.next_frame().unwrap(), HandFrame::Absent);
        assert_eq!(clock.now_ns(), 48_000_000);
        assert!(!tracker.is_finished());

        assert_eq!(tracker.next_frame().unwrap(), HandFrame::Absent);
        assert!(tracker.is_finished());
        assert_eq!(tracker.lines_read(), 5);
    }

    #[test]
    fn scripted_tracker_advances_clock_and_finishes() {
        let clock = ManualClock::new(0);
        let mut tracker = ScriptedTracker::from_steps([
            ScriptedStep::Frame(HandFrame::Absent),
            ScriptedStep::Fail,
        ])
        .with_clock(clock.clone(), Duration::from_millis(10));

        assert_eq!(tracker.next_frame().unwrap(), HandFrame::Absent);
        assert!(tracker.next_frame().is_err());
        assert_eq!(clock.now_ns(), 20_000_000);
        assert!(!tracker.is_finished());

        tracker.next_frame().unwrap();
        assert!(tracker.is_finished());
    }
}
