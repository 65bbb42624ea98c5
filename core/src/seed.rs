//! Seed data for the tabular store
//!
//! The store is materialized from a list of table definitions: either the
//! built-in set below or a JSON file holding an array of definitions.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use log::debug;

use crate::error::Result;
use crate::models::{types, Column, Row, TableDefinition, TableSchema};

/// Built-in seed tables
pub fn default_definitions() -> Vec<TableDefinition> {
    let company = TableDefinition::new(
        TableSchema::new(
            "company",
            vec![
                Column::new("id", types::INTEGER),
                Column::new("name", types::TEXT),
                Column::new("description", types::TEXT),
            ],
        ),
        vec![
            Row::new().with("id", 1).with("name", "demo").with("description", "test"),
            Row::new().with("id", 2).with("name", "test").with("description", "örnek"),
        ],
    );

    let users = TableDefinition::new(
        TableSchema::new(
            "users",
            vec![
                Column::new("id", types::INTEGER),
                Column::new("email", types::TEXT),
                Column::new("role", types::TEXT),
            ],
        ),
        vec![Row::new()
            .with("id", 1)
            .with("email", "admin@example.com")
            .with("role", "admin")],
    );

    vec![company, users]
}

/// Load table definitions from a JSON file
pub fn load_definitions<P: AsRef<Path>>(path: P) -> Result<Vec<TableDefinition>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let definitions: Vec<TableDefinition> = serde_json::from_reader(BufReader::new(file))?;

    debug!("Loaded {} table definitions from {}", definitions.len(), path.display());
    Ok(definitions)
}

/// Write table definitions to a JSON file
pub fn save_definitions<P: AsRef<Path>>(path: P, definitions: &[TableDefinition]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, definitions)?;
    Ok(())
}
