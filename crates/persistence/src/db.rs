//! PostgreSQL connection pool for the Giftlink store.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Pool sizing and timeouts, mapped from the api crate's `[database]`
/// config section.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

/// Builds the shared connection pool.
///
/// Fails fast when the database is unreachable at startup; liveness after
/// that is the health endpoints' concern.
pub async fn create_pool(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.connect_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect(&settings.url)
        .await
}
