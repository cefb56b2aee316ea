//! Error types for updates-sync
//!
//! All modules use `SyncerResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for updates-sync operations
pub type SyncerResult<T> = Result<T, SyncerError>;

/// All errors that can occur in updates-sync
#[derive(Error, Debug)]
pub enum SyncerError {
    // Configuration errors
    #[error("Syncer configuration not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Query errors
    #[error("Invalid artifact coordinates '{input}': {reason}")]
    InvalidCoordinates { input: String, reason: String },

    // Syncer errors
    #[error("Syncer produced unreadable output: {0}")]
    SyncerOutput(String),

    #[error("Syncer timed out after {secs}s: {command}")]
    SyncerTimeout { command: String, secs: u64 },

    // Worker errors
    #[error("Background sync worker has stopped")]
    WorkerStopped,

    #[error("Background sync job {job} panicked")]
    WorkerPanicked { job: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SyncerError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create an invalid coordinates error
    pub fn coordinates(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound(_) => {
                Some("Run: updates-sync config init, or pass --settings <file>")
            }
            Self::InvalidCoordinates { .. } => Some("Expected group:artifact:[min,max)"),
            Self::CommandFailed { .. } => Some("Check [syncer].command in the settings file"),
            _ => None,
        }
    }
}
