//! Table CRUD routes. Handlers resolve the table from the path segment against the catalog.

use crate::handlers::explorer::{create, delete as delete_handler, list, list_tables, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn explorer_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_tables))
        .route("/:table", get(list).put(create))
        .route("/:table/", get(list).put(create))
        .route(
            "/:table/:id",
            get(read).post(update).delete(delete_handler),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
