//! Error types for the core crate
//!
//! This module provides a consolidated error type for the tabular store,
//! covering addressing failures, schema extension failures, and the
//! I/O and JSON errors raised while loading seeds and configuration.

use thiserror::Error;
use std::io;

use crate::models::RowId;

/// Core error type
#[derive(Error, Debug)]
pub enum StudioError {
    /// No table with the given name exists (raised by add row and drop table)
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The addressed row does not exist, either because the table is unknown
    /// or because the index is outside `0..row_count`
    #[error("Row not found: {table}[{index}]")]
    RowNotFound {
        /// Table the caller addressed
        table: String,
        /// Positional index the caller addressed
        index: i64,
    },

    /// No row with the given stable id exists in the table
    #[error("Row not found: {table} id {id}")]
    RowIdNotFound {
        /// Table the caller addressed
        table: String,
        /// Stable row id the caller addressed
        id: RowId,
    },

    /// A table with the given name already exists
    #[error("Table already exists: {0}")]
    TableExists(String),

    /// Schema definition is not acceptable
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StudioError {
    /// Build a `RowNotFound` from a positional index
    pub fn row_not_found(table: &str, index: usize) -> Self {
        StudioError::RowNotFound {
            table: table.to_string(),
            index: i64::try_from(index).unwrap_or(i64::MAX),
        }
    }

    /// Whether the error means the addressed table or row is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StudioError::TableNotFound(_)
                | StudioError::RowNotFound { .. }
                | StudioError::RowIdNotFound { .. }
        )
    }
}

/// Result type for the core crate
pub type Result<T> = std::result::Result<T, StudioError>;

/// Convert a string error to a ConfigError
pub fn to_config_error<E: std::fmt::Display>(err: E) -> StudioError {
    StudioError::ConfigError(err.to_string())
}

/// Convert a string error to an InvalidSchema
pub fn to_schema_error<E: std::fmt::Display>(err: E) -> StudioError {
    StudioError::InvalidSchema(err.to_string())
}
