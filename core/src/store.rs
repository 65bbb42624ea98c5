//! In-memory tabular store
//!
//! This module provides the store behind the admin panel: an ordered set of
//! named tables with schema listing and row CRUD addressed by table name and
//! row position.
//!
//! Reads are lenient and writes are strict. Listing rows of an unknown table
//! yields an empty list, while adding to an unknown table fails with
//! `TableNotFound` and updating/deleting fails with `RowNotFound`.
//!
//! Positional indices are only valid until the next add or delete on the same
//! table. Callers that hold an index across calls should use the stable row
//! ids from [`TableStore::list_entries`] or compare
//! [`TableStore::table_revision`] before writing.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use log::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StudioError};
use crate::models::{Row, RowEntry, RowId, Table, TableDefinition, TableSchema};
use crate::seed;

/// Store of named tables held in process memory
#[derive(Debug, Default)]
pub struct TableStore {
    /// Tables in store order
    tables: RwLock<Vec<Table>>,
}

impl TableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in seed tables
    pub fn seeded() -> Self {
        let tables = seed::default_definitions()
            .into_iter()
            .map(Table::from_definition)
            .collect();

        TableStore {
            tables: RwLock::new(tables),
        }
    }

    /// Create a store from table definitions
    ///
    /// Fails with `TableExists` on duplicate table names and `InvalidSchema`
    /// when a definition has no name or repeats a column.
    pub fn from_definitions(definitions: Vec<TableDefinition>) -> Result<Self> {
        let mut tables: Vec<Table> = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let schema = TableSchema::new(definition.name.clone(), definition.columns.clone());
            schema.validate()?;

            if tables.iter().any(|t| t.name() == definition.name) {
                return Err(StudioError::TableExists(definition.name));
            }
            tables.push(Table::from_definition(definition));
        }

        info!("Initialized store with {} tables", tables.len());
        Ok(TableStore {
            tables: RwLock::new(tables),
        })
    }

    /// Create a store from configuration: the seed file if set, else the built-in seed
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match &config.seed_file {
            Some(path) => Self::from_definitions(seed::load_definitions(path)?),
            None => Self::from_definitions(seed::default_definitions()),
        }
    }

    // Every mutation is a single Vec operation, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Table>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Table>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Schemas of all tables in store order, without row data
    pub fn list_tables(&self) -> Vec<TableSchema> {
        self.read().iter().map(|t| t.schema().clone()).collect()
    }

    /// Schema of one table
    pub fn table_schema(&self, table: &str) -> Option<TableSchema> {
        self.read()
            .iter()
            .find(|t| t.name() == table)
            .map(|t| t.schema().clone())
    }

    /// Mutation counter of one table
    pub fn table_revision(&self, table: &str) -> Option<u64> {
        self.read().iter().find(|t| t.name() == table).map(Table::revision)
    }

    /// Number of rows in a table; 0 for an unknown table
    pub fn row_count(&self, table: &str) -> usize {
        self.read().iter().find(|t| t.name() == table).map_or(0, Table::len)
    }

    /// All rows of a table in order; empty for an unknown table
    pub fn list_rows(&self, table: &str) -> Vec<Row> {
        self.read()
            .iter()
            .find(|t| t.name() == table)
            .map(Table::rows)
            .unwrap_or_default()
    }

    /// All rows of a table with their positions and stable ids; empty for an unknown table
    pub fn list_entries(&self, table: &str) -> Vec<RowEntry> {
        self.read()
            .iter()
            .find(|t| t.name() == table)
            .map(Table::entries)
            .unwrap_or_default()
    }

    /// Row at a position
    pub fn get_row(&self, table: &str, index: usize) -> Option<Row> {
        self.read()
            .iter()
            .find(|t| t.name() == table)
            .and_then(|t| t.get(index).cloned())
    }

    /// Current position of a stable row id
    pub fn position_of(&self, table: &str, id: RowId) -> Option<usize> {
        self.read()
            .iter()
            .find(|t| t.name() == table)
            .and_then(|t| t.position(id))
    }

    /// Append a row to a table, returning the stored row
    pub fn add_row(&self, table: &str, row: Row) -> Result<Row> {
        self.add_entry(table, row).map(|entry| entry.row)
    }

    /// Append a row to a table, returning its entry with the assigned id
    pub fn add_entry(&self, table: &str, row: Row) -> Result<RowEntry> {
        let mut tables = self.write();
        let target = tables
            .iter_mut()
            .find(|t| t.name() == table)
            .ok_or_else(|| StudioError::TableNotFound(table.to_string()))?;

        let entry = target.push(row);
        debug!("Added row {} to {} at index {}", entry.id, table, entry.index);
        Ok(entry)
    }

    /// Replace the row at a position wholesale, returning the replacement
    pub fn update_row(&self, table: &str, index: usize, row: Row) -> Result<Row> {
        let mut tables = self.write();
        let target = tables
            .iter_mut()
            .find(|t| t.name() == table)
            .ok_or_else(|| StudioError::row_not_found(table, index))?;

        target
            .replace(index, row.clone())
            .ok_or_else(|| StudioError::row_not_found(table, index))?;

        debug!("Updated row {} in {}", index, table);
        Ok(row)
    }

    /// Remove the row at a position, returning the removed row
    ///
    /// Rows after `index` move one position earlier.
    pub fn delete_row(&self, table: &str, index: usize) -> Result<Row> {
        let mut tables = self.write();
        let target = tables
            .iter_mut()
            .find(|t| t.name() == table)
            .ok_or_else(|| StudioError::row_not_found(table, index))?;

        let removed = target
            .remove(index)
            .ok_or_else(|| StudioError::row_not_found(table, index))?;

        debug!("Deleted row {} from {}", index, table);
        Ok(removed)
    }

    /// Replace the row with a stable id wholesale, returning the replacement
    pub fn update_row_by_id(&self, table: &str, id: RowId, row: Row) -> Result<Row> {
        let mut tables = self.write();
        let not_found = || StudioError::RowIdNotFound { table: table.to_string(), id };

        let target = tables.iter_mut().find(|t| t.name() == table).ok_or_else(not_found)?;
        let index = target.position(id).ok_or_else(not_found)?;
        target.replace(index, row.clone()).ok_or_else(not_found)?;

        debug!("Updated row {} in {}", id, table);
        Ok(row)
    }

    /// Remove the row with a stable id, returning the removed row
    pub fn delete_row_by_id(&self, table: &str, id: RowId) -> Result<Row> {
        let mut tables = self.write();
        let not_found = || StudioError::RowIdNotFound { table: table.to_string(), id };

        let target = tables.iter_mut().find(|t| t.name() == table).ok_or_else(not_found)?;
        let index = target.position(id).ok_or_else(not_found)?;
        let removed = target.remove(index).ok_or_else(not_found)?;

        debug!("Deleted row {} from {}", id, table);
        Ok(removed)
    }

    /// Add an empty table at the end of store order
    pub fn create_table(&self, schema: TableSchema) -> Result<TableSchema> {
        schema.validate()?;

        let mut tables = self.write();
        if tables.iter().any(|t| t.name() == schema.name) {
            return Err(StudioError::TableExists(schema.name));
        }

        info!("Created table {} with {} columns", schema.name, schema.columns.len());
        tables.push(Table::new(schema.clone()));
        Ok(schema)
    }

    /// Remove a table and its rows, returning its schema
    pub fn drop_table(&self, table: &str) -> Result<TableSchema> {
        let mut tables = self.write();
        let position = tables
            .iter()
            .position(|t| t.name() == table)
            .ok_or_else(|| StudioError::TableNotFound(table.to_string()))?;

        let dropped = tables.remove(position);
        info!("Dropped table {} ({} rows)", table, dropped.len());
        Ok(dropped.schema().clone())
    }
}
