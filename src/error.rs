//! Error types for trajectory I/O and scoring configuration.
//!
//! Most read paths in this crate degrade softly (empty results plus a log
//! line). Only writes and configuration validation surface an error.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for trajectory operations.
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// A trajectory file could not be created, written or renamed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input validation errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for trajectory operations.
pub type Result<T> = std::result::Result<T, TrajectoryError>;

impl TrajectoryError {
    /// Create an I/O error tagged with the offending path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
