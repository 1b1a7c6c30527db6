//! Database connection pool and schema migrations

use std::time::Duration;

use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use tracing::info;

use catalog_shared::config::DatabaseSettings;

pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
        .connect(&settings.url)
        .await?;
    info!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
