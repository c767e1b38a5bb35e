//! Userbase HTTP server.
//!
//! Serves the user record API backed by a SQLite database.
//!
//! Usage:
//!   HOST=127.0.0.1 PORT=8080 DB_URL=users.db CORS='*' userbase-server
//!
//! Each setting can also be passed as a flag; see `--help`.

use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use userbase_server::{build_router, AppState, Config, Database};
use userbase_storage::{SqliteUserStore, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    let log_level = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Userbase server starting...");

    let store: Arc<dyn UserStore> = match config.database() {
        Database::InMemory => {
            Arc::new(SqliteUserStore::open_in_memory().context("Failed to open in-memory database")?)
        }
        Database::File(path) => Arc::new(
            SqliteUserStore::open(&path)
                .with_context(|| format!("Failed to open database at {}", path.display()))?,
        ),
    };
    info!("Database ready");

    let app = build_router(AppState::new(store), config.cors_policy());

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
