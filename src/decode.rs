//! Row decoding: raw driver values normalized into `Entry` records by column category.
//!
//! The output shape is decided by the column's declared category, never by what the
//! driver happened to return: null stays null, integer columns become integers, all
//! other columns become text.

use crate::catalog::{ColumnMetadata, TableMetadata};
use crate::entry::{Entry, FieldValue};
use crate::error::ExplorerError;
use sqlx::mysql::MySqlRow;
use sqlx::{Row, ValueRef};

/// One column value as scanned from the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Scan column `idx` of `row` without assuming its type.
    pub fn scan(row: &MySqlRow, idx: usize) -> Result<Self, sqlx::Error> {
        if row.try_get_raw(idx)?.is_null() {
            return Ok(RawValue::Null);
        }
        if let Ok(n) = row.try_get::<i64, _>(idx) {
            return Ok(RawValue::Integer(n));
        }
        if let Ok(n) = row.try_get::<u64, _>(idx) {
            return Ok(match i64::try_from(n) {
                Ok(n) => RawValue::Integer(n),
                Err(_) => RawValue::Bytes(n.to_string().into_bytes()),
            });
        }
        if let Ok(s) = row.try_get::<String, _>(idx) {
            return Ok(RawValue::Bytes(s.into_bytes()));
        }
        let bytes: Vec<u8> = row.try_get(idx)?;
        Ok(RawValue::Bytes(bytes))
    }

    fn into_integer(self, column: &str) -> i64 {
        match self {
            RawValue::Integer(n) => n,
            RawValue::Bytes(b) => match std::str::from_utf8(&b).ok().and_then(|s| s.trim().parse().ok()) {
                Some(n) => n,
                None => {
                    tracing::warn!(column = %column, "non-integer value in integer column, using 0");
                    0
                }
            },
            RawValue::Null => 0,
        }
    }

    fn into_text(self) -> String {
        match self {
            RawValue::Integer(n) => n.to_string(),
            RawValue::Bytes(b) => String::from_utf8(b)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
            RawValue::Null => String::new(),
        }
    }
}

fn normalize(raw: RawValue, column: &ColumnMetadata) -> FieldValue {
    match raw {
        RawValue::Null => FieldValue::Null,
        raw if column.is_numeric_type => FieldValue::Integer(raw.into_integer(&column.field_name)),
        raw => FieldValue::Text(raw.into_text()),
    }
}

/// Decodes rows selected with the table's canonical column list.
pub struct RowDecoder<'a> {
    table: &'a TableMetadata,
}

impl<'a> RowDecoder<'a> {
    pub fn new(table: &'a TableMetadata) -> Self {
        RowDecoder { table }
    }

    /// Pair raw values positionally with the table's columns.
    pub fn decode_values(&self, raw: Vec<RawValue>) -> Entry {
        self.table
            .columns
            .iter()
            .zip(raw)
            .map(|(column, value)| (column.field_name.clone(), normalize(value, column)))
            .collect()
    }

    fn scan(&self, row: &MySqlRow) -> Result<Vec<RawValue>, sqlx::Error> {
        (0..self.table.columns.len())
            .map(|idx| RawValue::scan(row, idx))
            .collect()
    }

    /// Absent row and any scan failure are both reported as not found.
    pub fn decode_single(&self, row: Option<&MySqlRow>) -> Result<Entry, ExplorerError> {
        let row = row.ok_or(ExplorerError::RecordNotFound)?;
        match self.scan(row) {
            Ok(raw) => Ok(self.decode_values(raw)),
            Err(e) => {
                tracing::debug!(table = %self.table.name, error = %e, "scan failed");
                Err(ExplorerError::RecordNotFound)
            }
        }
    }

    pub fn decode_many(&self, rows: &[MySqlRow]) -> Result<Vec<Entry>, ExplorerError> {
        rows.iter()
            .map(|row| Ok(self.decode_values(self.scan(row)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{items, scores};

    #[test]
    fn nulls_stay_null_in_every_category() {
        let table = scores();
        let got = RowDecoder::new(&table).decode_values(vec![
            RawValue::Integer(1),
            RawValue::Integer(10),
            RawValue::Null,
            RawValue::Null,
        ]);
        assert_eq!(got["bonus"], FieldValue::Null);
        assert_eq!(got["note"], FieldValue::Null);
        assert_eq!(got["points"], FieldValue::Integer(10));
    }

    #[test]
    fn category_decides_the_output_shape() {
        let table = items();
        let got = RowDecoder::new(&table).decode_values(vec![
            RawValue::Bytes(b"3".to_vec()),
            RawValue::Bytes(b"db_crud".to_vec()),
            RawValue::Integer(42),
            RawValue::Bytes(Vec::new()),
        ]);
        assert_eq!(got["id"], FieldValue::Integer(3));
        assert_eq!(got["title"], FieldValue::Text("db_crud".into()));
        assert_eq!(got["description"], FieldValue::Text("42".into()));
        assert_eq!(got["updated"], FieldValue::Text(String::new()));
    }

    #[test]
    fn unparsable_integer_bytes_become_zero() {
        let table = scores();
        let got = RowDecoder::new(&table).decode_values(vec![
            RawValue::Integer(1),
            RawValue::Bytes(b"abc".to_vec()),
            RawValue::Bytes(b" -4 ".to_vec()),
            RawValue::Null,
        ]);
        assert_eq!(got["points"], FieldValue::Integer(0));
        assert_eq!(got["bonus"], FieldValue::Integer(-4));
    }

    #[test]
    fn invalid_utf8_is_rendered_lossily() {
        let table = items();
        let got = RowDecoder::new(&table).decode_values(vec![
            RawValue::Integer(1),
            RawValue::Bytes(vec![b'a', 0xff]),
            RawValue::Null,
            RawValue::Null,
        ]);
        assert_eq!(got["title"], FieldValue::Text("a\u{fffd}".into()));
    }

    #[test]
    fn missing_row_is_not_found() {
        let table = items();
        assert!(matches!(
            RowDecoder::new(&table).decode_single(None),
            Err(ExplorerError::RecordNotFound)
        ));
    }
}
