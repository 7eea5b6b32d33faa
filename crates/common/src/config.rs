//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hand tracker settings.
    pub tracker: TrackerConfig,

    /// Where pointer commands go.
    pub output: OutputConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Settings passed to the external hand-landmark detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detector command line (program followed by arguments). When unset,
    /// landmark frames are read from stdin.
    pub detector_command: Option<Vec<String>>,

    /// Camera device index.
    pub camera_index: u32,

    /// Requested capture width in pixels.
    pub frame_width: u32,

    /// Requested capture height in pixels.
    pub frame_height: u32,

    /// Minimum confidence for the initial hand detection.
    pub min_detection_confidence: f64,

    /// Minimum confidence for frame-to-frame tracking.
    pub min_tracking_confidence: f64,

    /// Maximum hands the detector should report. Only the first is used.
    pub max_hands: u32,
}

/// Pointer output backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputBackend {
    /// Inject through the `xdotool` command.
    #[default]
    Xdotool,
    /// Only record commands to the command log.
    Log,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Backend receiving pointer commands.
    pub backend: OutputBackend,

    /// Optional JSONL file recording every emitted command.
    pub command_log: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "gesturemouse=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detector_command: None,
            camera_index: 0,
            frame_width: 1280,
            frame_height: 720,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
            max_hands: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl TrackerConfig {
    /// Arguments appended to the detector command so it opens the
    /// configured camera with the configured thresholds.
    pub fn detector_args(&self) -> Vec<String> {
        vec![
            "--camera".to_string(),
            self.camera_index.to_string(),
            "--width".to_string(),
            self.frame_width.to_string(),
            "--height".to_string(),
            self.frame_height.to_string(),
            "--min-detection-confidence".to_string(),
            self.min_detection_confidence.to_string(),
            "--min-tracking-confidence".to_string(),
            self.min_tracking_confidence.to_string(),
            "--max-hands".to_string(),
            self.max_hands.to_string(),
        ]
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&config_path, json)?;
        Ok(config_path)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gesturemouse").join("config.json")
}
