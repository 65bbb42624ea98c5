//! Table row representation
//!
//! A row is an open mapping from column name to a scalar or string value.
//! Rows are never checked against the declared columns of their table.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use serde::de::{self, Deserializer, Visitor};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Value stored in a row cell
///
/// Serialized untagged, so a row reads as a plain JSON object. Integers that
/// do not fit in an `i64` are rejected rather than widened to `Float`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,

    /// Boolean
    Boolean(bool),

    /// Integer (64-bit)
    Integer(i64),

    /// Floating point (64-bit)
    Float(f64),

    /// Text string
    Text(String),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Name of the value's kind, in the same vocabulary as column type tags
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
        }
    }

    /// Borrow the text payload, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "a null, boolean, 64-bit integer, float or string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| E::custom(format!("integer {} is out of range for a 64-bit signed value", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A row in a table: column name to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: BTreeMap<String, Value>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Set a value for a column, returning the previous value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(column.into(), value.into())
    }

    /// Remove a column from the row
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.remove(column)
    }

    /// Whether the row populates the column
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Number of populated columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no column is populated
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column/value pairs in sorted column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for Row {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Row { values }
    }
}

/// Stable synthetic row identifier, assigned when a row enters the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(Uuid);

impl RowId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        RowId(Uuid::new_v4())
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RowId {
    fn from(id: Uuid) -> Self {
        RowId(id)
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_json_shape() {
        let row = Row::new()
            .with("id", 1)
            .with("name", "demo")
            .with("description", "test");

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "name": "demo", "description": "test" })
        );
    }

    #[test]
    fn test_untagged_value_parsing() {
        let row: Row = serde_json::from_str(
            r#"{"id": 2, "ratio": 0.5, "active": true, "note": null, "name": "örnek"}"#,
        )
        .unwrap();

        assert_eq!(row.get("id"), Some(&Value::Integer(2)));
        assert_eq!(row.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(row.get("active"), Some(&Value::Boolean(true)));
        assert_eq!(row.get("note"), Some(&Value::Null));
        assert_eq!(row.get("name").and_then(Value::as_text), Some("örnek"));
        assert_eq!(row.len(), 5);
    }

    #[test]
    fn test_nested_values_rejected() {
        let parsed = serde_json::from_str::<Row>(r#"{"tags": ["a", "b"]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_out_of_range_integer_rejected() {
        let err = serde_json::from_str::<Row>(r#"{"id": 18446744073709551615}"#).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let row: Row = serde_json::from_str(r#"{"id": 9223372036854775807, "low": -9223372036854775808}"#).unwrap();
        assert_eq!(row.get("id"), Some(&Value::Integer(i64::MAX)));
        assert_eq!(row.get("low"), Some(&Value::Integer(i64::MIN)));
    }

    #[test]
    fn test_nan_equality() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(1.0), Value::Integer(1));
    }

    #[test]
    fn test_row_set_and_remove() {
        let mut row = Row::new().with("name", "demo");
        assert_eq!(row.set("name", "renamed"), Some(Value::from("demo")));
        assert!(row.contains("name"));
        assert_eq!(row.remove("name"), Some(Value::from("renamed")));
        assert!(row.is_empty());
    }

    #[test]
    fn test_value_display_and_type_name() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::from(Some(7i64)).to_string(), "7");
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from("x").type_name(), "text");
        assert_eq!(Value::from(true).type_name(), "boolean");
    }

    #[test]
    fn test_row_ids_are_unique() {
        let a = RowId::new();
        let b = RowId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), a.as_uuid().to_string());
    }
}
