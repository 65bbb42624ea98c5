//! Data models for the tabular store
//!
//! This module provides data structures for representing tables, their
//! column schemas, and the open key-value rows they hold.

mod table;
mod row;

pub use table::{Column, TableSchema, TableDefinition, Table, RowEntry};
pub use row::{Row, RowId, Value};

/// Column type tags used by the built-in seed
pub mod types {
    /// Integer column
    pub const INTEGER: &str = "integer";

    /// Text column
    pub const TEXT: &str = "text";

    /// Boolean column
    pub const BOOLEAN: &str = "boolean";

    /// Floating point column
    pub const FLOAT: &str = "float";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_match_value_names() {
        assert_eq!(Value::from(1).type_name(), types::INTEGER);
        assert_eq!(Value::from("x").type_name(), types::TEXT);
        assert_eq!(Value::from(false).type_name(), types::BOOLEAN);
        assert_eq!(Value::from(1.5).type_name(), types::FLOAT);
    }
}
