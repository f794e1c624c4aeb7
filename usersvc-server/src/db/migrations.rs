//! Schema bootstrap for the users table

use sqlx::PgPool;

/// Create the `users` table and its lookup indexes if missing.
///
/// Safe to run on every startup.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running users migrations...");

    // gen_random_uuid() is built in from PostgreSQL 13
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Users migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    // email is covered by its UNIQUE constraint
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_first_name ON users(first_name)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_last_name ON users(last_name)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");

        let (exists,): (bool,) = sqlx::query_as("SELECT to_regclass('public.users') IS NOT NULL")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert!(exists);
    }
}
