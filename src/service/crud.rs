//! Generic CRUD execution against MySQL. One round trip per call.

use crate::catalog::Catalog;
use crate::decode::RowDecoder;
use crate::entry::{Entry, Summary};
use crate::error::ExplorerError;
use crate::request::RequestDescriptor;
use crate::service::RequestValidator;
use crate::sql::{bind_params, delete, insert, select_by_id, select_list, update, QueryBuf};
use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::MySqlPool;

pub struct CrudService;

impl CrudService {
    /// Page of rows in key order.
    pub async fn list(pool: &MySqlPool, catalog: &Catalog, req: &RequestDescriptor) -> Result<Vec<Entry>, ExplorerError> {
        let table = catalog.table(&req.table)?;
        let q = select_list(table, req.page);
        let rows = Self::fetch_all(pool, &q).await?;
        RowDecoder::new(table).decode_many(&rows)
    }

    /// One row by key; `RecordNotFound` when absent.
    pub async fn read(pool: &MySqlPool, catalog: &Catalog, req: &RequestDescriptor) -> Result<Entry, ExplorerError> {
        let table = catalog.table(&req.table)?;
        let q = select_by_id(table, Self::require_id(req)?)?;
        let row = Self::fetch_optional(pool, &q).await?;
        RowDecoder::new(table).decode_single(row.as_ref())
    }

    /// Insert over every writable column. Returns `{<key column>: generated id}`.
    pub async fn create(pool: &MySqlPool, catalog: &Catalog, req: &RequestDescriptor) -> Result<Summary, ExplorerError> {
        let table = catalog.table(&req.table)?;
        RequestValidator::validate(&req.body, table)?;
        let q = insert(table, &req.body);
        let result = Self::execute(pool, &q).await?;
        let mut out = Summary::new();
        match table.id_column() {
            Some(pk) => out.insert(pk.to_string(), result.last_insert_id()),
            None => out.insert("inserted".to_string(), result.rows_affected()),
        };
        Ok(out)
    }

    /// Partial update by key. Returns `{"updated": rows affected}`.
    pub async fn update(pool: &MySqlPool, catalog: &Catalog, req: &RequestDescriptor) -> Result<Summary, ExplorerError> {
        let table = catalog.table(&req.table)?;
        RequestValidator::validate(&req.body, table)?;
        let q = update(table, Self::require_id(req)?, &req.body)?;
        let result = Self::execute(pool, &q).await?;
        Ok(Summary::from([("updated".to_string(), result.rows_affected())]))
    }

    /// Unconditional delete by key. Returns `{"deleted": rows affected}`, zero for a missing row.
    pub async fn delete(pool: &MySqlPool, catalog: &Catalog, req: &RequestDescriptor) -> Result<Summary, ExplorerError> {
        let table = catalog.table(&req.table)?;
        let q = delete(table, Self::require_id(req)?)?;
        let result = Self::execute(pool, &q).await?;
        Ok(Summary::from([("deleted".to_string(), result.rows_affected())]))
    }

    fn require_id(req: &RequestDescriptor) -> Result<i64, ExplorerError> {
        req.id.ok_or_else(|| ExplorerError::BadRequest("missing id".into()))
    }

    async fn fetch_all(pool: &MySqlPool, q: &QueryBuf) -> Result<Vec<MySqlRow>, ExplorerError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(bind_params(sqlx::query(&q.sql), &q.params).fetch_all(pool).await?)
    }

    async fn fetch_optional(pool: &MySqlPool, q: &QueryBuf) -> Result<Option<MySqlRow>, ExplorerError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(bind_params(sqlx::query(&q.sql), &q.params).fetch_optional(pool).await?)
    }

    async fn execute(pool: &MySqlPool, q: &QueryBuf) -> Result<MySqlQueryResult, ExplorerError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        Ok(bind_params(sqlx::query(&q.sql), &q.params).execute(pool).await?)
    }
}
