//! Shared application state for all routes. The catalog is built once and never mutated.

use crate::catalog::Catalog;
use sqlx::MySqlPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(pool: MySqlPool, catalog: Catalog) -> Self {
        AppState {
            pool,
            catalog: Arc::new(catalog),
        }
    }
}
