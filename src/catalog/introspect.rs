//! Build the catalog from the live database (information_schema of the current database).

use crate::catalog::{Catalog, ColumnMetadata, TableMetadata};
use crate::error::ExplorerError;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

const LIST_TABLES: &str = r#"
    SELECT CONVERT(TABLE_NAME USING utf8mb4) AS TABLE_NAME
    FROM information_schema.tables
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_TYPE = 'BASE TABLE'
    ORDER BY TABLE_NAME
"#;

const DESCRIBE_COLUMNS: &str = r#"
    SELECT
        CONVERT(COLUMN_NAME USING utf8mb4) AS COLUMN_NAME,
        CONVERT(COLUMN_TYPE USING utf8mb4) AS COLUMN_TYPE,
        CONVERT(IS_NULLABLE USING utf8mb4) AS IS_NULLABLE,
        CONVERT(EXTRA USING utf8mb4) AS EXTRA
    FROM information_schema.columns
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

/// information_schema may hand back VARBINARY depending on server charset settings.
fn get_string(row: &MySqlRow, column: &str) -> Result<String, ExplorerError> {
    let raw = match row.try_get::<Option<String>, _>(column) {
        Ok(value) => value.map(String::into_bytes),
        Err(_) => row.try_get::<Option<Vec<u8>>, _>(column)?,
    };
    required_text(column, raw)
}

/// Every attribute read during introspection is mandatory.
fn required_text(column: &str, raw: Option<Vec<u8>>) -> Result<String, ExplorerError> {
    let bytes = raw.ok_or_else(|| ExplorerError::Introspection(format!("{} is NULL", column)))?;
    String::from_utf8(bytes)
        .map_err(|_| ExplorerError::Introspection(format!("{} is not valid UTF-8", column)))
}

fn non_empty(column: &str, name: String) -> Result<String, ExplorerError> {
    if name.is_empty() {
        return Err(ExplorerError::Introspection(format!("{} is empty", column)));
    }
    Ok(name)
}

fn get_name(row: &MySqlRow, column: &str) -> Result<String, ExplorerError> {
    non_empty(column, get_string(row, column)?)
}

impl Catalog {
    /// Verify connectivity, then describe every base table. Any failure aborts the build.
    pub async fn build(pool: &MySqlPool) -> Result<Catalog, ExplorerError> {
        sqlx::query("SELECT 1").execute(pool).await?;

        let names = list_tables(pool).await?;
        if names.is_empty() {
            return Err(ExplorerError::NoTablesFound);
        }

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let columns = describe_columns(pool, &name).await?;
            tracing::debug!(table = %name, columns = columns.len(), "described table");
            let table = TableMetadata::new(name, columns);
            if table.id_column().is_none() {
                tracing::warn!(table = %table.name, "table has no auto-increment key; by-id operations are rejected");
            }
            tables.push(table);
        }

        let catalog = Catalog::new(tables)?;
        tracing::info!(tables = catalog.len(), "schema catalog built");
        Ok(catalog)
    }
}

async fn list_tables(pool: &MySqlPool) -> Result<Vec<String>, ExplorerError> {
    let rows = sqlx::query(LIST_TABLES).fetch_all(pool).await?;
    rows.iter().map(|row| get_name(row, "TABLE_NAME")).collect()
}

async fn describe_columns(pool: &MySqlPool, table: &str) -> Result<Vec<ColumnMetadata>, ExplorerError> {
    let rows = sqlx::query(DESCRIBE_COLUMNS).bind(table).fetch_all(pool).await?;
    rows.iter()
        .map(|row| -> Result<ColumnMetadata, ExplorerError> {
            Ok(ColumnMetadata::from_describe(
                &get_name(row, "COLUMN_NAME")?,
                &get_string(row, "COLUMN_TYPE")?,
                &get_string(row, "EXTRA")?,
                &get_string(row, "IS_NULLABLE")?,
            ))
        })
        .collect()
}
