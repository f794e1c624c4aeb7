//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection and wait limits. Repositories
//! receive the pool at construction.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time a request waits for a free connection.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl PoolConfig {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Create a PostgreSQL connection pool with default limits.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/users").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, PoolConfig::default()).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// Connects eagerly so a bad URL or unreachable server fails at startup.
pub async fn create_pool_with_options(
    database_url: &str,
    config: PoolConfig,
) -> Result<PgPool, sqlx::Error> {
    let pool = config.options().connect(database_url).await?;
    tracing::debug!(
        max_connections = config.max_connections,
        acquire_timeout_ms = config.acquire_timeout.as_millis() as u64,
        "database pool ready"
    );
    Ok(pool)
}

/// Create a pool that only connects when a query first needs a connection.
pub fn create_lazy_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    config.options().connect_lazy(database_url)
}
