//! Inbound payload filtering and type/nullability/immutability checks against table metadata.

use crate::catalog::{ColumnMetadata, TableMetadata};
use crate::entry::{Entry, FieldValue};
use crate::error::ExplorerError;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Check every column present in `entry`, in canonical column order. Absent columns are skipped.
    /// Reports the first offending column only.
    pub fn validate(entry: &Entry, table: &TableMetadata) -> Result<(), ExplorerError> {
        for column in &table.columns {
            let Some(value) = entry.get(&column.field_name) else {
                continue;
            };
            if !accepts(column, value) {
                return Err(ExplorerError::InvalidFieldType(column.field_name.clone()));
            }
        }
        Ok(())
    }

    /// Keep only known columns; numbers become integers (JSON has a single floating point number type).
    /// Unknown keys are dropped silently. A value with no `FieldValue` form fails, unless an earlier
    /// column already violates [`validate`](Self::validate), in which case that column is reported.
    pub fn coerce_inbound(raw: &Map<String, Value>, table: &TableMetadata) -> Result<Entry, ExplorerError> {
        let mut entry = Entry::new();
        for column in &table.columns {
            let Some(value) = raw.get(&column.field_name) else {
                continue;
            };
            let value = match value {
                Value::Null => FieldValue::Null,
                Value::String(s) => FieldValue::Text(s.clone()),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => FieldValue::Integer(i),
                    None => FieldValue::Integer(n.as_f64().map(|f| f as i64).unwrap_or_default()),
                },
                Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                    Self::validate(&entry, table)?;
                    return Err(ExplorerError::InvalidFieldType(column.field_name.clone()));
                }
            };
            entry.insert(column.field_name.clone(), value);
        }
        Ok(entry)
    }
}

fn accepts(column: &ColumnMetadata, value: &FieldValue) -> bool {
    if column.is_auto_increment {
        return false;
    }
    match value {
        FieldValue::Null => column.is_nullable,
        FieldValue::Text(_) => !column.is_numeric_type,
        FieldValue::Integer(_) => column.is_numeric_type,
    }
}
