//! GestureMouse CLI: drive the pointer with hand gestures.
//!
//! Usage:
//!   gesturemouse run [OPTIONS]       Start gesture control
//!   gesturemouse replay <FILE>       Run a landmark recording offline
//!   gesturemouse check               Check system capabilities
//!   gesturemouse config [--write]    Show or save the effective config

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gesturemouse_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "gesturemouse",
    about = "Control the mouse pointer with hand gestures",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a live gesture control session
    Run {
        /// Detector program and arguments, after `--` (overrides the config file)
        #[arg(last = true, value_name = "DETECTOR")]
        detector: Vec<String>,

        /// Camera index passed to the detector
        #[arg(long)]
        camera: Option<u32>,

        /// Log commands instead of moving the pointer
        #[arg(long)]
        dry_run: bool,

        /// Command log path (defaults to the config value)
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Run a recorded landmark stream through the gesture pipeline
    Replay {
        /// Landmark JSONL recording
        file: PathBuf,

        /// Virtual screen width
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Virtual screen height
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Command log output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pace frames by their recorded timestamps
        #[arg(long)]
        realtime: bool,
    },

    /// Check system capabilities
    Check,

    /// Print the effective configuration
    Config {
        /// Save it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load();

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    gesturemouse_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Run {
            detector,
            camera,
            dry_run,
            log,
        } => {
            if !detector.is_empty() {
                config.tracker.detector_command = Some(detector);
            }
            if let Some(camera) = camera {
                config.tracker.camera_index = camera;
            }
            if log.is_some() {
                config.output.command_log = log;
            }
            commands::run::run(config, dry_run).await
        }
        Commands::Replay {
            file,
            width,
            height,
            output,
            realtime,
        } => commands::replay::run(file, width, height, output, realtime).await,
        Commands::Check => commands::check::run(&config),
        Commands::Config { write } => commands::config::run(&config, write),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_detector_keeps_arguments_verbatim() {
        let cli = Cli::try_parse_from([
            "gesturemouse",
            "run",
            "--dry-run",
            "--",
            "python3",
            "/opt/hand tools/detect.py",
            "--model",
            "lite",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                detector, dry_run, ..
            } => {
                assert!(dry_run);
                assert_eq!(
                    detector,
                    vec!["python3", "/opt/hand tools/detect.py", "--model", "lite"]
                );
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_replay_arguments() {
        let cli = Cli::try_parse_from([
            "gesturemouse",
            "replay",
            "session.jsonl",
            "--width",
            "2560",
            "--realtime",
        ])
        .unwrap();
        match cli.command {
            Commands::Replay {
                file,
                width,
                height,
                output,
                realtime,
            } => {
                assert_eq!(file, PathBuf::from("session.jsonl"));
                assert_eq!((width, height), (2560, 1080));
                assert!(output.is_none());
                assert!(realtime);
            }
            _ => panic!("expected replay"),
        }
    }
}
