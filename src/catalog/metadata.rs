//! Column and table metadata discovered at startup, flattened for runtime use.

use crate::entry::FieldValue;
use crate::error::ExplorerError;
use std::collections::HashMap;

/// What the validator, the query builder and the decoder need to know about one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub field_name: String,
    /// Declared type contains an integer marker (`int`, `bigint`, `tinyint(1)`, ...).
    pub is_numeric_type: bool,
    pub is_nullable: bool,
    /// Server-generated primary key.
    pub is_auto_increment: bool,
}

impl ColumnMetadata {
    /// Classify a column from the raw attributes reported by the database.
    pub fn from_describe(field_name: &str, column_type: &str, extra: &str, nullable: &str) -> Self {
        ColumnMetadata {
            field_name: field_name.to_string(),
            is_numeric_type: column_type.to_lowercase().contains("int"),
            is_nullable: nullable.eq_ignore_ascii_case("YES"),
            is_auto_increment: extra.to_lowercase().contains("increment"),
        }
    }

    /// Value written for a missing non-nullable column on insert.
    pub fn zero_value(&self) -> FieldValue {
        if self.is_numeric_type {
            FieldValue::Integer(0)
        } else {
            FieldValue::Text(String::new())
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableMetadata {
    pub name: String,
    /// Canonical column order as returned by introspection.
    pub columns: Vec<ColumnMetadata>,
    pub column_names: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        let column_names = columns.iter().map(|c| c.field_name.clone()).collect();
        let by_name = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.field_name.clone(), i))
            .collect();
        TableMetadata {
            name: name.into(),
            columns,
            column_names,
            by_name,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.by_name.get(name).map(|&i| &self.columns[i])
    }

    /// Name of the auto-increment column, if the table has one.
    pub fn id_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.is_auto_increment)
            .map(|c| c.field_name.as_str())
    }

    /// Like [`id_column`](Self::id_column) but fails for tables without a generated key.
    pub fn require_id_column(&self) -> Result<&str, ExplorerError> {
        self.id_column().ok_or_else(|| {
            ExplorerError::BadRequest(format!("table {} has no auto-increment key", self.name))
        })
    }

    /// Every column except the auto-increment one, in canonical order.
    pub fn writable_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns.iter().filter(|c| !c.is_auto_increment)
    }
}

/// Read-only map from table name to its metadata. Built once, shared by reference.
#[derive(Clone, Debug)]
pub struct Catalog {
    table_names: Vec<String>,
    tables: HashMap<String, TableMetadata>,
}

impl Catalog {
    /// Catalog over already known tables. Fails on an empty list.
    pub fn new(tables: Vec<TableMetadata>) -> Result<Self, ExplorerError> {
        if tables.is_empty() {
            return Err(ExplorerError::NoTablesFound);
        }
        let table_names = tables.iter().map(|t| t.name.clone()).collect();
        let tables = tables.into_iter().map(|t| (t.name.clone(), t)).collect();
        Ok(Catalog { table_names, tables })
    }

    pub fn table(&self, name: &str) -> Result<&TableMetadata, ExplorerError> {
        self.tables
            .get(name)
            .ok_or_else(|| ExplorerError::UnknownTable(name.to_string()))
    }

    /// Table names in discovery order.
    pub fn table_names(&self) -> &[String] {
        &self.table_names
    }

    pub fn len(&self) -> usize {
        self.table_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table_names.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn items() -> TableMetadata {
        TableMetadata::new(
            "items",
            vec![
                ColumnMetadata::from_describe("id", "int(11)", "auto_increment", "NO"),
                ColumnMetadata::from_describe("title", "varchar(255)", "", "NO"),
                ColumnMetadata::from_describe("description", "text", "", "NO"),
                ColumnMetadata::from_describe("updated", "varchar(255)", "", "YES"),
            ],
        )
    }

    pub fn scores() -> TableMetadata {
        TableMetadata::new(
            "scores",
            vec![
                ColumnMetadata::from_describe("score_id", "bigint unsigned", "auto_increment", "NO"),
                ColumnMetadata::from_describe("points", "int", "", "NO"),
                ColumnMetadata::from_describe("bonus", "smallint", "", "YES"),
                ColumnMetadata::from_describe("note", "varchar(64)", "", "YES"),
            ],
        )
    }

    pub fn tags() -> TableMetadata {
        TableMetadata::new(
            "tags",
            vec![
                ColumnMetadata::from_describe("item_id", "int", "", "NO"),
                ColumnMetadata::from_describe("label", "varchar(32)", "", "NO"),
            ],
        )
    }
}
