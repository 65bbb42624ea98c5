//! Error types for the command-line caller
//!
//! Store failures pass through unchanged; the remaining variants cover
//! malformed input given on the command line or in a script file.

use std::io;
use thiserror::Error;
use db_studio_core::StudioError;

/// Result type for the CLI
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Error raised by the store
    #[error(transparent)]
    Store(#[from] StudioError),

    /// Row argument is not a flat JSON object of scalars
    #[error("Invalid row JSON: {0}")]
    InvalidRow(#[source] serde_json::Error),

    /// Script file could not be read or parsed
    #[error("Script error in {path}: {message}")]
    Script {
        /// Script path
        path: String,
        /// Cause
        message: String,
    },
}

impl CliError {
    /// Build a script error from any displayable cause
    pub fn script<E: std::fmt::Display>(path: &str, err: E) -> Self {
        CliError::Script {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Store(StudioError::IoError(err))
    }
}
