//! Table representation
//!
//! This module provides the column schema of a table and the table itself:
//! an ordered row sequence addressed by position, with a stable id and a
//! modification timestamp attached to every stored row.

use std::collections::HashSet;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::error::{to_schema_error, Result};
use super::row::{Row, RowId};

/// Definition of a column in a table schema
///
/// The type tag is free-form and used for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Name of the column
    pub name: String,

    /// Display type tag (e.g. "integer", "text")
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Schema of a table: its name and ordered columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Name of the table
    pub name: String,

    /// Columns in declared order
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a new table schema
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        TableSchema {
            name: name.into(),
            columns,
        }
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// Check if the schema has a column
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|col| col.name == name)
    }

    /// Column names in declared order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// Reject empty table names and duplicate column names
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(to_schema_error("table name must not be empty"));
        }

        let mut seen = HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.name.as_str()) {
                return Err(to_schema_error(format!(
                    "duplicate column '{}' in table '{}'",
                    col.name, self.name
                )));
            }
        }

        Ok(())
    }
}

/// Seed definition of a table: schema plus initial rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Name of the table
    pub name: String,

    /// Columns in declared order
    pub columns: Vec<Column>,

    /// Initial rows
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableDefinition {
    /// Create a definition from a schema and its initial rows
    pub fn new(schema: TableSchema, rows: Vec<Row>) -> Self {
        TableDefinition {
            name: schema.name,
            columns: schema.columns,
            rows,
        }
    }
}

/// A row as held by a table
#[derive(Debug, Clone)]
struct StoredRow {
    id: RowId,
    row: Row,
    updated_at: DateTime<Utc>,
}

impl StoredRow {
    fn new(row: Row) -> Self {
        StoredRow {
            id: RowId::new(),
            row,
            updated_at: Utc::now(),
        }
    }
}

/// Read view of a stored row with its current position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowEntry {
    /// Current zero-based position in the table
    pub index: usize,

    /// Stable row id
    pub id: RowId,

    /// Row values
    pub row: Row,

    /// Time the row was added or last replaced
    pub updated_at: DateTime<Utc>,
}

/// A table: schema, rows and a mutation counter
#[derive(Clone)]
pub struct Table {
    schema: TableSchema,
    rows: Vec<StoredRow>,
    revision: u64,
}

impl Debug for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Table")
            .field("schema", &self.schema)
            .field("row_count", &self.rows.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Table {
    /// Create an empty table
    pub fn new(schema: TableSchema) -> Self {
        Table {
            schema,
            rows: Vec::new(),
            revision: 0,
        }
    }

    /// Create a table from a seed definition; seeding does not bump the revision
    pub fn from_definition(definition: TableDefinition) -> Self {
        let TableDefinition { name, columns, rows } = definition;
        Table {
            schema: TableSchema { name, columns },
            rows: rows.into_iter().map(StoredRow::new).collect(),
            revision: 0,
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// Table schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of successful row mutations since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at a position
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index).map(|stored| &stored.row)
    }

    /// Owned copy of all rows in order
    pub fn rows(&self) -> Vec<Row> {
        self.rows.iter().map(|stored| stored.row.clone()).collect()
    }

    /// Owned copy of all rows with their positions and ids
    pub fn entries(&self) -> Vec<RowEntry> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, stored)| RowEntry {
                index,
                id: stored.id,
                row: stored.row.clone(),
                updated_at: stored.updated_at,
            })
            .collect()
    }

    /// Current position of a stable id
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|stored| stored.id == id)
    }

    /// Append a row, returning its entry
    pub fn push(&mut self, row: Row) -> RowEntry {
        let stored = StoredRow::new(row);
        let entry = RowEntry {
            index: self.rows.len(),
            id: stored.id,
            row: stored.row.clone(),
            updated_at: stored.updated_at,
        };
        self.rows.push(stored);
        self.revision += 1;
        entry
    }

    /// Replace the row at a position wholesale; the stable id is kept
    pub fn replace(&mut self, index: usize, row: Row) -> Option<Row> {
        let stored = self.rows.get_mut(index)?;
        let previous = std::mem::replace(&mut stored.row, row);
        stored.updated_at = Utc::now();
        self.revision += 1;
        Some(previous)
    }

    /// Remove the row at a position; later rows shift down by one
    pub fn remove(&mut self, index: usize) -> Option<Row> {
        if index >= self.rows.len() {
            return None;
        }
        let stored = self.rows.remove(index);
        self.revision += 1;
        Some(stored.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_schema() -> TableSchema {
        TableSchema::new(
            "company",
            vec![
                Column::new("id", "integer"),
                Column::new("name", "text"),
                Column::new("description", "text"),
            ],
        )
    }

    fn create_test_row(id: i64, name: &str) -> Row {
        Row::new().with("id", id).with("name", name)
    }

    #[test]
    fn test_column_serializes_type_key() {
        let json = serde_json::to_value(Column::new("id", "integer")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "id", "type": "integer" }));
    }

    #[test]
    fn test_schema_validation() {
        assert!(create_test_schema().validate().is_ok());

        let unnamed = TableSchema::new("  ", vec![]);
        assert!(unnamed.validate().is_err());

        let duplicate = TableSchema::new(
            "t",
            vec![Column::new("id", "integer"), Column::new("id", "text")],
        );
        let err = duplicate.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate column 'id'"));
    }

    #[test]
    fn test_schema_lookup() {
        let schema = create_test_schema();
        assert!(schema.has_column("name"));
        assert!(!schema.has_column("email"));
        assert_eq!(schema.get_column("id").map(|c| c.data_type.as_str()), Some("integer"));
        assert_eq!(schema.column_names(), vec!["id", "name", "description"]);
    }

    #[test]
    fn test_table_operations() {
        let mut table = Table::new(create_test_schema());
        assert!(table.is_empty());
        assert_eq!(table.revision(), 0);

        let first = table.push(create_test_row(1, "demo"));
        let second = table.push(create_test_row(2, "test"));
        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.revision(), 2);

        // Replace keeps the id
        let previous = table.replace(1, create_test_row(2, "renamed"));
        assert_eq!(previous, Some(create_test_row(2, "test")));
        assert_eq!(table.position(second.id), Some(1));
        assert_eq!(table.get(1), Some(&create_test_row(2, "renamed")));

        // Remove shifts later rows
        assert_eq!(table.remove(0), Some(create_test_row(1, "demo")));
        assert_eq!(table.position(first.id), None);
        assert_eq!(table.position(second.id), Some(0));
        assert_eq!(table.revision(), 4);

        // Out of bounds leaves the revision alone
        assert_eq!(table.replace(5, Row::new()), None);
        assert_eq!(table.remove(1), None);
        assert_eq!(table.revision(), 4);
    }

    #[test]
    fn test_from_definition() {
        let definition = TableDefinition::new(
            create_test_schema(),
            vec![create_test_row(1, "demo"), create_test_row(2, "test")],
        );
        let table = Table::from_definition(definition);

        assert_eq!(table.name(), "company");
        assert_eq!(table.revision(), 0);
        let entries = table.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].index, 1);
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_definition_rows_default_to_empty() {
        let definition: TableDefinition = serde_json::from_str(
            r#"{"name": "audit", "columns": [{"name": "at", "type": "text"}]}"#,
        )
        .unwrap();
        assert!(definition.rows.is_empty());
        assert_eq!(definition.columns[0].data_type, "text");
    }
}
