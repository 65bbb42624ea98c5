//! Store operations as data
//!
//! Each operation the panel can issue against the store is a variant of
//! [`Operation`], so it can come from a command-line argument or a JSON
//! script file. Executing an operation yields its JSON outcome.

use std::fs;
use std::path::Path;
use log::{debug, warn};
use serde::{Serialize, Deserialize};
use serde_json::json;

use db_studio_core::{Row, RowId, StudioError, TableSchema, TableStore};
use crate::error::{CliError, Result};

/// One request against the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// List table schemas
    ListTables,

    /// List rows of a table
    ListRows {
        /// Table name
        table: String,
    },

    /// List rows of a table with positions and stable ids
    ListEntries {
        /// Table name
        table: String,
    },

    /// Append a row
    AddRow {
        /// Table name
        table: String,
        /// New row
        row: Row,
    },

    /// Replace the row at a position
    UpdateRow {
        /// Table name
        table: String,
        /// Zero-based position; negative positions never match a row
        index: i64,
        /// Replacement row
        row: Row,
    },

    /// Remove the row at a position
    DeleteRow {
        /// Table name
        table: String,
        /// Zero-based position; negative positions never match a row
        index: i64,
    },

    /// Replace the row with a stable id
    UpdateRowById {
        /// Table name
        table: String,
        /// Stable row id
        id: RowId,
        /// Replacement row
        row: Row,
    },

    /// Remove the row with a stable id
    DeleteRowById {
        /// Table name
        table: String,
        /// Stable row id
        id: RowId,
    },

    /// Add an empty table
    CreateTable {
        /// Table schema
        schema: TableSchema,
    },

    /// Remove a table
    DropTable {
        /// Table name
        table: String,
    },
}

/// Convert a signed position into a store index
pub fn row_index(table: &str, index: i64) -> std::result::Result<usize, StudioError> {
    usize::try_from(index).map_err(|_| StudioError::RowNotFound {
        table: table.to_string(),
        index,
    })
}

/// Run one operation and render its outcome as JSON
pub fn execute(store: &TableStore, operation: &Operation) -> Result<serde_json::Value> {
    debug!("Executing {:?}", operation);

    let outcome = match operation {
        Operation::ListTables => json!(store.list_tables()),
        Operation::ListRows { table } => json!(store.list_rows(table)),
        Operation::ListEntries { table } => json!(store.list_entries(table)),
        Operation::AddRow { table, row } => json!(store.add_row(table, row.clone())?),
        Operation::UpdateRow { table, index, row } => {
            let index = row_index(table, *index)?;
            json!(store.update_row(table, index, row.clone())?)
        }
        Operation::DeleteRow { table, index } => {
            let index = row_index(table, *index)?;
            let removed = store.delete_row(table, index)?;
            json!({ "deleted": true, "row": removed })
        }
        Operation::UpdateRowById { table, id, row } => {
            json!(store.update_row_by_id(table, *id, row.clone())?)
        }
        Operation::DeleteRowById { table, id } => {
            let removed = store.delete_row_by_id(table, *id)?;
            json!({ "deleted": true, "row": removed })
        }
        Operation::CreateTable { schema } => json!(store.create_table(schema.clone())?),
        Operation::DropTable { table } => {
            let dropped = store.drop_table(table)?;
            json!({ "dropped": true, "table": dropped })
        }
    };

    Ok(outcome)
}

/// Outcome of a script run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptReport {
    /// One JSON outcome per operation, in order
    pub outcomes: Vec<serde_json::Value>,

    /// Number of operations that failed
    pub failures: usize,
}

/// Run operations in order against one store; failures are recorded and the run continues
pub fn run_script(store: &TableStore, operations: &[Operation]) -> ScriptReport {
    let mut report = ScriptReport::default();

    for (step, operation) in operations.iter().enumerate() {
        match execute(store, operation) {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(err) => {
                warn!("Step {} failed: {}", step, err);
                report.failures += 1;
                report.outcomes.push(json!({ "error": err.to_string() }));
            }
        }
    }

    report
}

/// Read a JSON array of operations
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<Operation>> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let text = fs::read_to_string(path).map_err(|e| CliError::script(&display, e))?;
    serde_json::from_str(&text).map_err(|e| CliError::script(&display, e))
}
