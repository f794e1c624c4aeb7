//! Database connection settings shared by every subcommand
//!
//! `DATABASE_URL` wins when set. Otherwise the URL is assembled from the
//! `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` variables, which
//! may come from a `.env` file.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use usersvc_server::db::{create_pool_with_options, PgPool, PoolConfig};

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host (used when no URL is given)
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds a request may wait for a pooled connection
    #[arg(long, default_value_t = 5)]
    pub acquire_timeout_secs: u64,
}

impl DatabaseArgs {
    /// Resolve the connection URL.
    pub fn url(&self) -> Result<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        let (Some(host), Some(name)) = (&self.db_host, &self.db_name) else {
            bail!(
                "database URL not configured. Set --database-url / DATABASE_URL, \
                 or DB_HOST and DB_NAME (plus DB_USER, DB_PASSWORD, DB_PORT)"
            );
        };

        let credentials = match (&self.db_user, &self.db_password) {
            (Some(user), Some(password)) => format!(
                "{}:{}@",
                urlencoding::encode(user),
                urlencoding::encode(password)
            ),
            (Some(user), None) => format!("{}@", urlencoding::encode(user)),
            (None, _) => String::new(),
        };

        Ok(format!(
            "postgres://{}{}:{}/{}?sslmode=disable",
            credentials,
            host,
            self.db_port,
            urlencoding::encode(name)
        ))
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }

    /// Connect a pool using these settings.
    pub async fn connect(&self) -> Result<PgPool> {
        let url = self.url()?;
        create_pool_with_options(&url, self.pool_config())
            .await
            .context("Failed to create database pool")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DatabaseArgs {
        DatabaseArgs {
            database_url: None,
            db_host: None,
            db_port: 5432,
            db_user: None,
            db_password: None,
            db_name: None,
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }

    #[test]
    fn explicit_url_wins() {
        let args = DatabaseArgs {
            database_url: Some("postgres://localhost/users".into()),
            db_host: Some("ignored".into()),
            db_name: Some("ignored".into()),
            ..args()
        };
        assert_eq!(args.url().unwrap(), "postgres://localhost/users");
    }

    #[test]
    fn assembles_url_from_parts() {
        let args = DatabaseArgs {
            db_host: Some("db".into()),
            db_port: 5433,
            db_user: Some("app".into()),
            db_password: Some("p@ss word".into()),
            db_name: Some("users".into()),
            ..args()
        };
        assert_eq!(
            args.url().unwrap(),
            "postgres://app:p%40ss%20word@db:5433/users?sslmode=disable"
        );
    }

    #[test]
    fn credentials_are_optional() {
        let args = DatabaseArgs {
            db_host: Some("localhost".into()),
            db_name: Some("users".into()),
            ..args()
        };
        assert_eq!(
            args.url().unwrap(),
            "postgres://localhost:5432/users?sslmode=disable"
        );
    }

    #[test]
    fn missing_host_is_an_error() {
        let args = DatabaseArgs {
            db_name: Some("users".into()),
            ..args()
        };
        let err = args.url().unwrap_err();
        assert!(err.to_string().contains("database URL not configured"));
    }

    #[test]
    fn pool_config_from_args() {
        let args = DatabaseArgs {
            max_connections: 12,
            acquire_timeout_secs: 2,
            ..args()
        };
        let config = args.pool_config();
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.acquire_timeout, Duration::from_secs(2));
    }
}
