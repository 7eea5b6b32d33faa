//! Replay a recorded landmark stream through the gesture pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use gesturemouse_common::clock::ManualClock;
use gesturemouse_hand_model::CommandLogHeader;
use gesturemouse_hand_tracker::{CommandLog, JsonlTracker};
use gesturemouse_platform_core::{ScreenSize, StaticDisplay};
use gesturemouse_session::SessionController;

pub async fn run(
    file: PathBuf,
    width: u32,
    height: u32,
    output: Option<PathBuf>,
    realtime: bool,
) -> anyhow::Result<()> {
    let reader = BufReader::new(
        File::open(&file).with_context(|| format!("Failed to open {}", file.display()))?,
    );

    // Recorded timestamps drive the session clock.
    let clock = ManualClock::new(0);
    let mut tracker =
        JsonlTracker::new(reader, file.display().to_string()).driving_clock(clock.clone());
    if realtime {
        tracker = tracker.realtime();
    }

    let screen = ScreenSize::new(width, height);
    let output = output.unwrap_or_else(|| file.with_extension("commands.jsonl"));
    let header = CommandLogHeader::new(chrono::Utc::now().to_rfc3339(), width, height);
    let log = CommandLog::create(&output, &header, Box::new(clock.clone()))
        .with_context(|| format!("Failed to create command log {}", output.display()))?;

    println!("Replaying {} on a {width}x{height} screen", file.display());

    let mut controller = SessionController::new();
    controller
        .start(
            Box::new(tracker),
            &StaticDisplay::centered(screen),
            Box::new(log),
            Box::new(clock),
        )
        .await
        .context("Failed to start replay session")?;
    let summary = controller.wait().await?;

    super::print_summary(&summary);
    println!("Commands written to: {}", output.display());

    Ok(())
}
