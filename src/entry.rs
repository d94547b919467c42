//! Untyped row values exchanged with clients in both directions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One column value: SQL null, an integer, or text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// Column name to value; one row, either an inbound payload or an output record.
pub type Entry = BTreeMap<String, FieldValue>;

/// Outcome of a write: `{<id column>: id}`, `{"updated": n}` or `{"deleted": n}`.
pub type Summary = BTreeMap<String, u64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_json() {
        let mut entry = Entry::new();
        entry.insert("id".into(), FieldValue::Integer(3));
        entry.insert("title".into(), "db_crud".into());
        entry.insert("updated".into(), FieldValue::Null);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "title": "db_crud", "updated": null}));
    }

    #[test]
    fn deserializes_untagged() {
        let entry: Entry = serde_json::from_str(r#"{"a": null, "b": 7, "c": "x"}"#).unwrap();
        assert_eq!(entry["a"], FieldValue::Null);
        assert_eq!(entry["b"], FieldValue::Integer(7));
        assert_eq!(entry["c"], FieldValue::Text("x".into()));
    }
}
