//! # Task Tracker API Server
//!
//! Session-authenticated task tracker: a task CRUD API, a login flow backed
//! by database sessions, a diagnostics endpoint, and the two static client
//! pages.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasktracker-api
//! ```

use std::sync::Arc;

use tasktracker_api::{
    app::{build_router, AppState},
    auth::FixedCredentials,
    background,
    config::Config,
    diagnostics::MemorySnapshot,
};
use tasktracker_shared::{
    db::{
        self,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::{PgSessionStore, PgTaskStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasktracker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Task Tracker API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Failing to reach the database at startup is fatal: exit rather than
    // serve degraded
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await
    .map_err(|err| anyhow::anyhow!("Database connection failed: {}", err))?;

    db::run_migrations(&pool).await?;

    let state = AppState::new(
        Arc::new(PgTaskStore::new(pool.clone())),
        Arc::new(PgSessionStore::new(pool.clone())),
        Arc::new(FixedCredentials::from_config(&config.auth)),
        config.clone(),
    );

    background::spawn_memory_monitor(config.diagnostics.memory_log_interval());
    background::spawn_session_sweep(state.sessions.clone(), config.session.sweep_interval());

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server running on http://{}", config.bind_address());
    MemorySnapshot::capture().log();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for SIGINT: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received, shutting down gracefully"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down gracefully"),
    }
}
