//! Error types for the Black Duck plugin

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code reported to the CI runner
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Execution(ExecutionError::Cancelled) => 130,
            _ => 1,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {} must be set", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse settings file: {0}")]
    ParseError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Errors raised while running the scanner process
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("scan command failed: could not start scanner: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("scan command failed: scanner {0}")]
    Failed(ExitStatus),

    #[error("scan command failed: could not wait for scanner: {0}")]
    Wait(#[source] std::io::Error),

    #[error("scan cancelled: scanner process was terminated")]
    Cancelled,
}
