//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Serialize)]
pub struct TablesList {
    pub tables: Vec<String>,
}

#[derive(Serialize)]
pub struct Records<T> {
    pub records: Vec<T>,
}

#[derive(Serialize)]
pub struct Record<T> {
    pub record: T,
}

pub fn success<T: Serialize>(response: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope { response }))
}
