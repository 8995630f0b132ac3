//! Database layer
//!
//! # Modules
//!
//! - `pool`: PostgreSQL connection pool management with a startup health check
//!
//! Migrations live in `migrations/` at the workspace root and are embedded
//! at compile time.
use sqlx::PgPool;
use tracing::info;

pub mod pool;

/// Runs all pending database migrations
///
/// Called once at startup, after the pool health check. A failure here is
/// fatal: the process must not serve against an unknown schema.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!("../migrations").run(pool).await?;
    info!("Database migrations up to date");
    Ok(())
}
