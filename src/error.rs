//! Error types for the rendering engine
//!
//! The engine contains most failures locally: malformed markup is skipped at
//! extraction time, render failures become cache states, and host apply
//! failures are logged and counted. What remains here is the small set of
//! errors that callers can actually act on.

use thiserror::Error;

/// Main engine error type encompassing all error categories
#[derive(Error, Debug)]
pub enum PreviewError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Host editor boundary errors
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Configuration related errors
///
/// These surface to the user: they indicate a configuration value the user
/// can correct, and they are the only failures that abort engine setup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Ghost opacity is not a finite number
    #[error("Ghost opacity must be a finite number, got {value}")]
    InvalidOpacity { value: f32 },

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Host editor boundary errors
#[derive(Error, Debug)]
pub enum HostError {
    /// A decoration batch could not be applied to the editor
    #[error("Could not apply decoration style '{style}'")]
    Apply {
        style: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The editor the engine was decorating is gone
    #[error("Editor is no longer available")]
    EditorClosed,
}

/// Result type alias for operations that can fail with PreviewError
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for host boundary operations
pub type HostResult<T> = Result<T, HostError>;

impl ConfigError {
    /// Create a user-friendly error message suitable for display in dialogs
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::InvalidOpacity { .. } => {
                "The ghost opacity setting is invalid. Use a number between 0.0 and 1.0."
                    .to_string()
            }
            ConfigError::InvalidValue { key, .. } => {
                format!("The setting '{}' has an invalid value.", key)
            }
        }
    }
}
