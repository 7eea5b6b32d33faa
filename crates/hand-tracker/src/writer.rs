//! Append-only command log.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gesturemouse_common::clock::Clock;
use gesturemouse_common::error::{GestureMouseError, GestureMouseResult};
use gesturemouse_hand_model::{CommandLogHeader, CommandRecord, PointerCommand};
use gesturemouse_platform_core::PointerSink;

/// A pointer sink that writes each command as a JSONL line, optionally
/// forwarding it to another sink afterwards.
pub struct CommandLog {
    writer: BufWriter<File>,
    path: PathBuf,
    clock: Box<dyn Clock>,
    forward: Option<Box<dyn PointerSink>>,
    commands_written: u64,
}

impl CommandLog {
    /// Create the log, writing the header as the first line.
    pub fn create(
        path: impl Into<PathBuf>,
        header: &CommandLogHeader,
        clock: Box<dyn Clock>,
    ) -> GestureMouseResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        // Header goes in a comment line so readers can skip it
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| GestureMouseError::output(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            clock,
            forward: None,
            commands_written: 0,
        })
    }

    /// Also pass every command on to `sink`.
    pub fn forwarding_to(mut self, sink: Box<dyn PointerSink>) -> Self {
        self.forward = Some(sink);
        self
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> GestureMouseResult<()> {
        self.writer
            .flush()
            .map_err(|e| GestureMouseError::output(format!("Failed to flush command log: {e}")))
    }

    pub fn commands_written(&self) -> u64 {
        self.commands_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PointerSink for CommandLog {
    fn apply(&mut self, command: &PointerCommand) -> GestureMouseResult<()> {
        let record = CommandRecord {
            timestamp_ns: self.clock.now_ns(),
            command: *command,
        };
        let json = serde_json::to_string(&record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| GestureMouseError::output(format!("Failed to write command: {e}")))?;
        self.commands_written += 1;

        // Button state changes are flushed immediately
        if matches!(command, PointerCommand::MouseDown | PointerCommand::MouseUp) {
            self.flush()?;
        }

        match self.forward.as_mut() {
            Some(sink) => sink.apply(command),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "command-log"
    }
}

impl Drop for CommandLog {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesturemouse_common::clock::ManualClock;
    use gesturemouse_hand_model::parse_commands;

    #[test]
    fn test_command_log_roundtrip() {
        let dir = std::env::temp_dir().join("gesturemouse_test_command_log");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("commands.jsonl");
        let header = CommandLogHeader::new("2026-01-01T00:00:00Z", 1920, 1080);
        let clock = ManualClock::new(0);

        {
            let mut log = CommandLog::create(&path, &header, Box::new(clock.clone())).unwrap();
            log.move_to(100, 200).unwrap();
            clock.set(33_000_000);
            log.mouse_down().unwrap();
            clock.set(66_000_000);
            log.scroll(-6).unwrap();
            assert_eq!(log.commands_written(), 3);
            assert_eq!(log.path(), path.as_path());
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# "));

        let records = parse_commands(&content).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].timestamp_ns, 33_000_000);
        assert_eq!(records[1].command, PointerCommand::MouseDown);
        assert_eq!(records[2].command, PointerCommand::Scroll { amount: -6 });

        std::fs::remove_dir_all(&dir).ok();
    }
}
