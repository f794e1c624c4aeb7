//! usersvc - users HTTP service
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `migrate`: create the users table
//! - `seed`: insert demo users

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "usersvc",
    author,
    version,
    about = "Create, look up and delete users over HTTP, backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::ServeArgs),
    /// Create the users table if missing
    Migrate(commands::MigrateArgs),
    /// Insert demo users
    Seed(commands::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so env-backed flags see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
    }
    Ok(())
}
