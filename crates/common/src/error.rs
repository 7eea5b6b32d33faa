//! Error types shared across GestureMouse crates.

/// Top-level error type for GestureMouse operations.
#[derive(Debug, thiserror::Error)]
pub enum GestureMouseError {
    #[error("Tracker error: {message}")]
    Tracker { message: String },

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("Display error: {message}")]
    Display { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("A gesture session is already active")]
    SessionAlreadyActive,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GestureMouseError.
pub type GestureMouseResult<T> = Result<T, GestureMouseError>;

impl GestureMouseError {
    pub fn tracker(msg: impl Into<String>) -> Self {
        Self::Tracker {
            message: msg.into(),
        }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output {
            message: msg.into(),
        }
    }

    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_build_matching_variants() {
        assert!(matches!(
            GestureMouseError::tracker("camera gone"),
            GestureMouseError::Tracker { .. }
        ));
        assert_eq!(
            GestureMouseError::output("xdotool failed").to_string(),
            "Output error: xdotool failed"
        );
        assert_eq!(
            GestureMouseError::SessionAlreadyActive.to_string(),
            "A gesture session is already active"
        );
    }
}
