//! Start a live gesture control session.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use gesturemouse_common::clock::MonotonicClock;
use gesturemouse_common::config::{AppConfig, OutputBackend};
use gesturemouse_hand_model::CommandLogHeader;
use gesturemouse_hand_tracker::{open_tracker, CommandLog};
use gesturemouse_platform_core::{
    CursorPosition, DisplayGeometry, PointerSink, ScreenSize, StaticDisplay,
};
use gesturemouse_platform_linux::{detect_display_server, XdotoolBackend};
use gesturemouse_session::SessionController;

const DRY_RUN_LOG: &str = "gesturemouse-commands.jsonl";

pub async fn run(config: AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let log_only = dry_run || config.output.backend == OutputBackend::Log;
    let xdotool = XdotoolBackend::new();

    tracing::info!(display_server = ?detect_display_server(), log_only, "Preparing session");

    let screen = match xdotool.screen_size() {
        Ok(size) => size,
        Err(e) if log_only => {
            tracing::warn!(error = %e, "Screen size unavailable, assuming default");
            ScreenSize::default()
        }
        Err(e) => {
            return Err(e).context("Failed to query screen geometry (is xdotool installed?)")
        }
    };
    let cursor = xdotool.cursor_position().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Pointer position unavailable, starting at screen center");
        CursorPosition::new(screen.width as f64 / 2.0, screen.height as f64 / 2.0)
    });
    let display = StaticDisplay {
        size: screen,
        cursor,
    };

    let clock = MonotonicClock::start();
    let log_path = config
        .output
        .command_log
        .clone()
        .or_else(|| log_only.then(|| PathBuf::from(DRY_RUN_LOG)));

    let sink: Box<dyn PointerSink> = match log_path {
        Some(path) => {
            let header = CommandLogHeader::new(clock.epoch_wall(), screen.width, screen.height);
            let log = CommandLog::create(&path, &header, Box::new(clock.clone()))
                .with_context(|| format!("Failed to create command log {}", path.display()))?;
            println!("Command log: {}", log.path().display());
            if log_only {
                Box::new(log)
            } else {
                Box::new(log.forwarding_to(Box::new(xdotool)))
            }
        }
        None => Box::new(xdotool),
    };

    let tracker = open_tracker(&config.tracker).context("Failed to start hand tracker")?;

    let mut controller = SessionController::new();
    controller
        .start(tracker, &display, sink, Box::new(clock))
        .await
        .context("Failed to start gesture session")?;

    println!("Gesture control active on {}x{}.", screen.width, screen.height);
    println!("Press Ctrl+C to stop...");
    println!();

    let signal = loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => break signal,
            _ = tokio::time::sleep(Duration::from_millis(200)) => {
                if !controller.is_running() {
                    tracing::info!("Hand tracker ended the session");
                    break Ok(());
                }
            }
        }
    };

    // Stop before surfacing a signal handler error so a held drag is released.
    let summary = controller.stop().await?;
    println!();
    super::print_summary(&summary);

    signal.context("Failed to listen for Ctrl+C")
}
