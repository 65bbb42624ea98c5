//! Command-line arguments
//!
//! Configuration precedence: built-in defaults, then the JSON config file,
//! then flags and environment variables. An explicit log level also beats
//! `RUST_LOG`.

use std::path::PathBuf;
use clap::{Parser, Subcommand};

use db_studio_core::{Row, StoreConfig};
use crate::error::{CliError, Result};
use crate::operation::Operation;

/// DB Studio tabular store
#[derive(Parser, Debug)]
#[clap(author, version, about = "DB Studio in-memory tabular store")]
pub struct Args {
    /// Config file path
    #[clap(short, long, env = "STUDIO_CONFIG")]
    pub config: Option<String>,

    /// JSON seed file with the initial tables
    #[clap(long, env = "STUDIO_SEED")]
    pub seed: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[clap(long, env = "STUDIO_LOG")]
    pub log_level: Option<String>,

    /// Operation to run
    #[clap(subcommand)]
    pub command: Command,
}

/// Subcommands; each runs against a freshly seeded store
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List tables and their columns
    Tables,

    /// List rows of a table
    Rows {
        /// Table name
        table: String,
    },

    /// List rows of a table with positions and stable ids
    Entries {
        /// Table name
        table: String,
    },

    /// Append a row given as a JSON object
    Add {
        /// Table name
        table: String,
        /// Row JSON, e.g. '{"id": 3, "name": "new"}'
        row: String,
    },

    /// Replace the row at a position
    Update {
        /// Table name
        table: String,
        /// Zero-based row position
        #[clap(allow_negative_numbers = true)]
        index: i64,
        /// Replacement row JSON
        row: String,
    },

    /// Remove the row at a position
    Delete {
        /// Table name
        table: String,
        /// Zero-based row position
        #[clap(allow_negative_numbers = true)]
        index: i64,
    },

    /// Run a JSON array of operations against one store
    Run {
        /// Script path
        script: PathBuf,
    },
}

fn parse_row(row: &str) -> Result<Row> {
    serde_json::from_str(row).map_err(CliError::InvalidRow)
}

impl Command {
    /// Translate a single-operation subcommand; `Run` yields `None`
    pub fn to_operation(&self) -> Result<Option<Operation>> {
        let operation = match self {
            Command::Tables => Operation::ListTables,
            Command::Rows { table } => Operation::ListRows { table: table.clone() },
            Command::Entries { table } => Operation::ListEntries { table: table.clone() },
            Command::Add { table, row } => Operation::AddRow {
                table: table.clone(),
                row: parse_row(row)?,
            },
            Command::Update { table, index, row } => Operation::UpdateRow {
                table: table.clone(),
                index: *index,
                row: parse_row(row)?,
            },
            Command::Delete { table, index } => Operation::DeleteRow {
                table: table.clone(),
                index: *index,
            },
            Command::Run { .. } => return Ok(None),
        };

        Ok(Some(operation))
    }
}

impl Args {
    /// Resolve the store configuration
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::new(),
        };

        if let Some(seed) = &self.seed {
            config.seed_file = Some(seed.clone());
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db_studio_core::StudioError;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_update_with_negative_index() {
        let args = Args::try_parse_from(["db-studio", "update", "company", "-1", r#"{"id": 1}"#]).unwrap();

        assert_eq!(
            args.command,
            Command::Update {
                table: "company".to_string(),
                index: -1,
                row: r#"{"id": 1}"#.to_string(),
            }
        );
    }

    #[test]
    fn test_command_to_operation() {
        let command = Command::Add {
            table: "company".to_string(),
            row: r#"{"id": 3, "name": "new", "description": "x"}"#.to_string(),
        };

        let operation = command.to_operation().unwrap();
        assert_eq!(
            operation,
            Some(Operation::AddRow {
                table: "company".to_string(),
                row: Row::new().with("id", 3).with("name", "new").with("description", "x"),
            })
        );

        let run = Command::Run { script: PathBuf::from("ops.json") };
        assert_eq!(run.to_operation().unwrap(), None);
    }

    #[test]
    fn test_invalid_row_json() {
        let command = Command::Add {
            table: "company".to_string(),
            row: "[1, 2]".to_string(),
        };
        assert!(matches!(command.to_operation(), Err(CliError::InvalidRow(_))));
    }

    #[test]
    fn test_row_integer_overflow_rejected() {
        let command = Command::Add {
            table: "company".to_string(),
            row: r#"{"id": 18446744073709551615}"#.to_string(),
        };
        match command.to_operation() {
            Err(CliError::InvalidRow(e)) => assert!(e.to_string().contains("out of range")),
            other => panic!("Expected InvalidRow, got {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();
        StoreConfig::development().to_file(&path).unwrap();

        let args = Args::try_parse_from([
            "db-studio",
            "--config",
            path.as_str(),
            "--seed",
            "/srv/seed.json",
            "tables",
        ])
        .unwrap();
        let config = args.store_config().unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(config.debug_mode);
        assert_eq!(config.seed_file, Some(PathBuf::from("/srv/seed.json")));
    }

    #[test]
    fn test_invalid_log_level_flag() {
        let args = Args::try_parse_from(["db-studio", "--log-level", "loud", "tables"]).unwrap();
        assert!(matches!(
            args.store_config(),
            Err(CliError::Store(StudioError::ConfigError(_)))
        ));
    }
}
