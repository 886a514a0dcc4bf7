//! Biztime server binary
//!
//! Initializes logging, loads configuration, builds the storage backend
//! selected at compile time, and serves the API with graceful shutdown.

use anyhow::Result;
use biztime::config::AppConfig;
use biztime::core::store::BizStore;
use biztime::server::router::build_router;
use biztime::server::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    let store = build_store(&config).await?;

    let app = build_router(AppState::new(store));
    let listener = TcpListener::bind(&config.server.addr).await?;

    tracing::info!("Server listening on {}", config.server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Build the PostgreSQL-backed store: connect the pool and apply pending
/// migrations before serving traffic.
#[cfg(feature = "postgres")]
async fn build_store(config: &AppConfig) -> Result<Arc<dyn BizStore>> {
    use biztime::storage::PostgresStore;
    use sqlx::postgres::PgPoolOptions;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(
        max_connections = config.database.max_connections,
        "Connected to PostgreSQL, migrations applied"
    );

    Ok(Arc::new(PostgresStore::new(pool)))
}

/// Build the in-memory store (default feature set).
#[cfg(not(feature = "postgres"))]
async fn build_store(_config: &AppConfig) -> Result<Arc<dyn BizStore>> {
    use biztime::storage::InMemoryStore;

    tracing::warn!("Running with the in-memory store; data will not survive a restart");

    Ok(Arc::new(InMemoryStore::new()))
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
