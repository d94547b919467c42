//! Table CRUD handlers: table list, row list, read, insert, update, delete.

use crate::error::ExplorerError;
use crate::request::{Pagination, RequestDescriptor};
use crate::response::{success, Record, Records, TablesList};
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i64, ExplorerError> {
    id_str
        .parse()
        .map_err(|_| ExplorerError::BadRequest(format!("invalid id: {}", id_str)))
}

/// The body is read whatever its content type; only its JSON shape matters.
fn body_to_map(body: &[u8]) -> Result<Map<String, Value>, ExplorerError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Err(ExplorerError::BadRequest("body must be a JSON object".into())),
        Err(e) => Err(ExplorerError::BadRequest(format!("invalid JSON body: {}", e))),
    }
}

/// Resolve the table, then parse, filter and coerce the raw payload against its columns.
fn mutation(state: &AppState, table: &str, body: &[u8]) -> Result<RequestDescriptor, ExplorerError> {
    let meta = state.catalog.table(table)?;
    let body = RequestValidator::coerce_inbound(&body_to_map(body)?, meta)?;
    Ok(RequestDescriptor::new(table).with_body(body))
}

pub async fn list_tables(State(state): State<AppState>) -> impl IntoResponse {
    success(TablesList {
        tables: state.catalog.table_names().to_vec(),
    })
}

pub async fn list(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ExplorerError> {
    let req = RequestDescriptor::new(table).with_page(Pagination::from_query(&params));
    tracing::debug!(table = %req.table, page = ?req.page, "list");
    let records = CrudService::list(&state.pool, &state.catalog, &req).await?;
    Ok(success(Records { records }))
}

pub async fn read(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, ExplorerError> {
    state.catalog.table(&table)?;
    let req = RequestDescriptor::new(table).with_id(parse_id(&id_str)?);
    tracing::debug!(table = %req.table, id = ?req.id, "read");
    let record = CrudService::read(&state.pool, &state.catalog, &req).await?;
    Ok(success(Record { record }))
}

pub async fn create(
    State(state): State<AppState>,
    Path(table): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ExplorerError> {
    let req = mutation(&state, &table, &body)?;
    tracing::debug!(table = %req.table, fields = req.body.len(), "create");
    let created = CrudService::create(&state.pool, &state.catalog, &req).await?;
    Ok(success(created))
}

pub async fn update(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, ExplorerError> {
    let req = mutation(&state, &table, &body)?.with_id(parse_id(&id_str)?);
    tracing::debug!(table = %req.table, id = ?req.id, fields = req.body.len(), "update");
    let updated = CrudService::update(&state.pool, &state.catalog, &req).await?;
    Ok(success(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, ExplorerError> {
    state.catalog.table(&table)?;
    let req = RequestDescriptor::new(table).with_id(parse_id(&id_str)?);
    tracing::debug!(table = %req.table, id = ?req.id, "delete");
    let deleted = CrudService::delete(&state.pool, &state.catalog, &req).await?;
    Ok(success(deleted))
}
