//! HTTP server command
//!
//! Connects the pool, bootstraps the schema and serves the users API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use usersvc_server::db::{migrations, ConflictPolicy, UserRepo};
use usersvc_server::http::{run_server, ServerConfig};
use usersvc_server::AppState;

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "USERSVC_BIND", default_value = "127.0.0.1:8890")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// What creating a user with a registered email does:
    /// `update` returns the existing id, `nothing` answers 409
    #[arg(long, env = "USER_CONFLICT_POLICY", default_value = "update")]
    pub conflict_policy: ConflictPolicy,

    /// Do not create the users table on startup
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(bind = %args.bind, "Starting usersvc server");

    let pool = args.database.connect().await?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let repo = UserRepo::new(pool.clone(), args.conflict_policy);
    tracing::info!(conflict_policy = %repo.policy(), "User repository ready");
    let state = AppState::new(Arc::new(repo));

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(state, config).await.context("Server error")?;

    pool.close().await;
    Ok(())
}
