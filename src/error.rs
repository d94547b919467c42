//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid setting {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown table")]
    UnknownTable(String),
    #[error("record not found")]
    RecordNotFound,
    #[error("field {0} have invalid type")]
    InvalidFieldType(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no tables in database")]
    NoTablesFound,
    #[error("schema introspection: {0}")]
    Introspection(String),
    #[error("database: {0}")]
    Storage(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ExplorerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ExplorerError::UnknownTable(_) | ExplorerError::RecordNotFound => StatusCode::NOT_FOUND,
            ExplorerError::InvalidFieldType(_) | ExplorerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ExplorerError::Config(_)
            | ExplorerError::NoTablesFound
            | ExplorerError::Introspection(_)
            | ExplorerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
