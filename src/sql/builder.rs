//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from catalog metadata.

use crate::catalog::TableMetadata;
use crate::entry::{Entry, FieldValue};
use crate::error::ExplorerError;
use crate::request::Pagination;

/// Quote identifier for MySQL (safe: only from the catalog).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FieldValue) {
        self.params.push(v);
    }
}

/// SELECT list in canonical order: integer columns as-is, everything else as CHAR so the driver returns text.
fn select_column_list(table: &TableMetadata) -> String {
    table
        .columns
        .iter()
        .map(|c| {
            let q = quoted(&c.field_name);
            if c.is_numeric_type {
                q
            } else {
                format!("CAST({} AS CHAR) AS {}", q, q)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT page of rows, ordered by the auto-increment key when there is one. LIMIT/OFFSET are bound.
pub fn select_list(table: &TableMetadata, page: Pagination) -> QueryBuf {
    let mut q = QueryBuf::new();
    let order_clause = table
        .id_column()
        .map(|pk| format!(" ORDER BY {}", quoted(pk)))
        .unwrap_or_default();
    q.push_param(FieldValue::Integer(i64::from(page.limit)));
    q.push_param(FieldValue::Integer(i64::from(page.offset)));
    q.sql = format!(
        "SELECT {} FROM {}{} LIMIT ? OFFSET ?",
        select_column_list(table),
        quoted(&table.name),
        order_clause
    );
    q
}

/// SELECT one row by auto-increment key.
pub fn select_by_id(table: &TableMetadata, id: i64) -> Result<QueryBuf, ExplorerError> {
    let pk = table.require_id_column()?;
    let mut q = QueryBuf::new();
    q.push_param(FieldValue::Integer(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list(table),
        quoted(&table.name),
        quoted(pk)
    );
    Ok(q)
}

/// INSERT over all writable columns. Missing or null values of non-nullable columns become the column's zero value.
pub fn insert(table: &TableMetadata, body: &Entry) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    for c in table.writable_columns() {
        let val = match body.get(&c.field_name) {
            Some(v) if !v.is_null() => v.clone(),
            _ if !c.is_nullable => c.zero_value(),
            _ => FieldValue::Null,
        };
        q.push_param(val);
        cols.push(quoted(&c.field_name));
    }
    let placeholders = vec!["?"; cols.len()].join(", ");
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(&table.name),
        cols.join(", "),
        placeholders
    );
    q
}

/// UPDATE by key: SET only writable columns present in body. Nothing to set is a bad request.
pub fn update(table: &TableMetadata, id: i64, body: &Entry) -> Result<QueryBuf, ExplorerError> {
    let pk = table.require_id_column()?;
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in table.writable_columns() {
        let Some(v) = body.get(&c.field_name) else { continue };
        q.push_param(v.clone());
        sets.push(format!("{} = ?", quoted(&c.field_name)));
    }
    if sets.is_empty() {
        return Err(ExplorerError::BadRequest("no updatable fields".into()));
    }
    q.push_param(FieldValue::Integer(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(&table.name),
        sets.join(", "),
        quoted(pk)
    );
    Ok(q)
}

/// DELETE by key. Unconditional; a missing row simply affects nothing.
pub fn delete(table: &TableMetadata, id: i64) -> Result<QueryBuf, ExplorerError> {
    let pk = table.require_id_column()?;
    let mut q = QueryBuf::new();
    q.push_param(FieldValue::Integer(id));
    q.sql = format!("DELETE FROM {} WHERE {} = ?", quoted(&table.name), quoted(pk));
    Ok(q)
}
