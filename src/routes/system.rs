//! Operational routes: liveness, readiness against the pool, build version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
    tables: usize,
    pool_size: u32,
    pool_idle: usize,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let reachable = sqlx::query("SELECT 1").execute(&state.pool).await;
    let (code, status, database) = match reachable {
        Ok(_) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };
    let body = Readiness {
        status,
        database,
        tables: state.catalog.len(),
        pool_size: state.pool.size(),
        pool_idle: state.pool.num_idle(),
    };
    (code, Json(body))
}

async fn version() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health, GET /ready, GET /version. Mounted under a prefix by the caller.
pub fn system_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
