//! Demo data command

use anyhow::{bail, Result};
use clap::Parser;
use usersvc_server::db::{migrations, UserRepo, UserStore};
use usersvc_server::models::NewUser;

use crate::config::DatabaseArgs;

/// Demo users: (first name, last name, email)
const DEMO_USERS: &[(&str, &str, &str)] = &[
    ("Anish", "Sinha", "anishsinha0128@gmail.com"),
    ("Jenny", "Kim", "jennykim12@gmail.com"),
    ("Jenny", "Cho", "jennycho35@gmail.com"),
    ("Toffee", "Sinha", "toffee123@gmail.com"),
    ("Meadow", "Sinha", "meadow12@gmail.com"),
    ("Melody", "Cho", "melodyc12@gmail.com"),
    ("Earl", "Cho", "earlthegrey12@gmail.com"),
    ("Honey", "Cho", "honeyb12@gmail.com"),
    ("Almond", "Cho", "almond#1@gmail.com"),
];

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Insert the demo users.
///
/// Re-running is harmless: existing emails resolve to their current ids.
/// A failing user is logged and skipped; the command fails only if none
/// could be inserted.
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let pool = args.database.connect().await?;
    migrations::run(&pool).await?;
    let repo = UserRepo::with_default_policy(pool.clone());

    let mut inserted = 0usize;
    for (first_name, last_name, email) in DEMO_USERS {
        let user = match NewUser::new(first_name, last_name, email) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(%email, error = %e, "Skipping invalid demo user");
                continue;
            }
        };

        match repo
            .insert(user.first_name(), user.last_name(), user.email())
            .await
        {
            Ok(id) => {
                tracing::info!(%id, "Seeded {} {}", first_name, last_name);
                inserted += 1;
            }
            Err(e) => {
                tracing::error!(%email, error = %e, "Error inserting user {} {}", first_name, last_name);
            }
        }
    }

    pool.close().await;

    if inserted == 0 {
        bail!("no demo users could be inserted");
    }
    tracing::info!("Seeded {}/{} users", inserted, DEMO_USERS.len());
    Ok(())
}
