//! # DB Studio Core
//!
//! Table/row model and the in-memory tabular store behind the DB Studio
//! administration panel. The store holds a small set of named tables, each
//! with a column schema and an ordered row collection, and exposes schema
//! discovery plus row CRUD addressed by table name and row position.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod store;

/// Re-export common types for ease of use
pub use config::StoreConfig;
pub use error::{Result, StudioError};
pub use models::{Column, Row, RowEntry, RowId, Table, TableDefinition, TableSchema, Value};
pub use store::TableStore;

/// Version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_from_file_config() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        let definitions = vec![TableDefinition::new(
            TableSchema::new("projects", vec![Column::new("title", "text")]),
            vec![Row::new().with("title", "panel")],
        )];
        seed::save_definitions(&seed_path, &definitions).unwrap();

        let config = StoreConfig {
            seed_file: Some(seed_path),
            ..StoreConfig::testing()
        };
        let store = TableStore::from_config(&config).unwrap();

        let names: Vec<String> = store.list_tables().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["projects".to_string()]);
        assert_eq!(store.list_rows("projects"), vec![Row::new().with("title", "panel")]);
    }

    #[test]
    fn test_store_from_missing_seed_file() {
        let config = StoreConfig {
            seed_file: Some("/nonexistent/seed.json".into()),
            ..StoreConfig::default()
        };
        assert!(matches!(TableStore::from_config(&config), Err(StudioError::IoError(_))));
    }
}
