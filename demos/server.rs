//! Example server: reads settings from env (and `.env`), introspects the database once, then serves every table.

use axum::Router;
use db_explorer::{explorer_routes, system_routes, AppState, Catalog, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("db_explorer=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = settings.connect().await?;
    let catalog = Catalog::build(&pool).await?;
    tracing::info!(tables = ?catalog.table_names(), "tables discovered");

    let state = AppState::new(pool, catalog);
    let app = Router::new()
        .nest("/_sys", system_routes(state.clone()))
        .merge(explorer_routes(state));

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
