pub mod config;
pub mod db;
pub mod http;
pub mod store;

use anyhow::{Context, Result};
use tracing::info;

pub use config::{ApiConfig, Overrides};
pub use db::Database;
pub use http::{API_PREFIX, ApiError, build_router};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Opens the database, creates the schema if needed, and serves until ctrl-c.
pub async fn serve(config: ApiConfig) -> Result<()> {
    let db = Database::open(&config.db_path, config.pool_size)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    let app = build_router(AppState::new(db), &config.allowed_origins)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("robotops api listening on http://{}", addr);
    info!("sqlite database at {}", config.db_path.display());
    info!(origins = ?config.allowed_origins, "cors allowlist");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
