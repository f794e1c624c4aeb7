//! Subcommand implementations

pub mod migrate;
pub mod seed;
pub mod serve;

pub use migrate::{run_migrate, MigrateArgs};
pub use seed::{run_seed, SeedArgs};
pub use serve::{run_serve, ServeArgs};
