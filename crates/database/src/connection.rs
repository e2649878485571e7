use crate::error::DbError;
use configuration::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The connection string comes from `database.url`, or from `DATABASE_URL`
/// (optionally via `.env`) when the setting is absent.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let database_url = config
        .database_url()
        .map_err(|e| DbError::ConnectionConfigError(e.to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations so the `students` collection exists.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
