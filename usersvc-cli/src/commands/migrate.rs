//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;
use usersvc_server::db::migrations;

use crate::config::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Create the users table if it does not exist yet
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.database.connect().await?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    pool.close().await;
    Ok(())
}
