//! User repository
//!
//! Handles user CRUD with proper patterns:
//! - insert: INSERT with ON CONFLICT (email), policy fixed at construction
//! - delete: affected-row count distinguishes "not found" from store errors
//! - lookups: caller-chosen columns go through [`LookupField`]

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::query::{LookupField, SELECT_BY_ID};
use crate::db::DbError;
use crate::models::ValidationError;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// What `insert` does when the email is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Touch the existing row and return its id. Names are not updated.
    #[default]
    UpdateExisting,
    /// Leave the existing row alone and fail with [`DbError::EmailTaken`].
    DoNothing,
}

impl ConflictPolicy {
    fn insert_query(self) -> &'static str {
        match self {
            Self::UpdateExisting => {
                r#"
                INSERT INTO users (first_name, last_name, email)
                VALUES ($1, $2, $3)
                ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
                RETURNING id
                "#
            }
            Self::DoNothing => {
                r#"
                INSERT INTO users (first_name, last_name, email)
                VALUES ($1, $2, $3)
                ON CONFLICT (email) DO NOTHING
                RETURNING id
                "#
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateExisting => "update",
            Self::DoNothing => "nothing",
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "update" => Ok(Self::UpdateExisting),
            "nothing" => Ok(Self::DoNothing),
            _ => Err(ValidationError::InvalidVariant {
                field: "conflict policy",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations the HTTP layer needs from user storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, resolving an email conflict per the store's policy.
    async fn insert(&self, first_name: &str, last_name: &str, email: &str)
        -> Result<Uuid, DbError>;

    /// Delete exactly the user with `id`.
    async fn delete(&self, id: Uuid) -> Result<(), DbError>;

    async fn get_by_id(&self, id: Uuid) -> Result<User, DbError>;

    async fn get_by_email(&self, email: &str) -> Result<User, DbError>;

    /// All users whose `field` equals `value`; empty when none match.
    async fn find_by(&self, field: LookupField, value: &str) -> Result<Vec<User>, DbError>;

    /// Like [`UserStore::find_by`] for an untrusted column name.
    ///
    /// Fails with [`DbError::InvalidColumn`] before touching the store when
    /// `column` is not allow-listed.
    async fn find_by_column(&self, column: &str, value: &str) -> Result<Vec<User>, DbError> {
        let field: LookupField = column.parse()?;
        self.find_by(field, value).await
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepo {
    pool: PgPool,
    policy: ConflictPolicy,
}

impl UserRepo {
    pub fn new(pool: PgPool, policy: ConflictPolicy) -> Self {
        Self { pool, policy }
    }

    pub fn with_default_policy(pool: PgPool) -> Self {
        Self::new(pool, ConflictPolicy::default())
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<User>, DbError> {
        self.find_by(LookupField::FirstName, first_name).await
    }

    pub async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<User>, DbError> {
        self.find_by(LookupField::LastName, last_name).await
    }

    /// Run a single-row lookup, mapping zero rows to `NotFound`.
    async fn fetch_one_user(&self, sql: &'static str, bind: Bound<'_>) -> Result<User, DbError> {
        let query = sqlx::query(sql);
        let query = match bind {
            Bound::Id(id) => query.bind(id),
            Bound::Text(value) => query.bind(value),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::QueryFailed)?
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: bind.to_string(),
            })?;

        user_from_row(&row, bind.column())
    }
}

/// Value for a single-row lookup, remembered for error context.
#[derive(Clone, Copy)]
enum Bound<'a> {
    Id(Uuid),
    Text(&'a str),
}

impl Bound<'_> {
    fn column(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Text(_) => LookupField::Email.column(),
        }
    }
}

impl fmt::Display for Bound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn insert(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Uuid, DbError> {
        let id: Option<Uuid> = sqlx::query_scalar(self.policy.insert_query())
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::InsertFailed)?;

        match (id, self.policy) {
            (Some(id), _) => {
                tracing::debug!(%id, policy = %self.policy, "user inserted");
                Ok(id)
            }
            (None, ConflictPolicy::DoNothing) => Err(DbError::EmailTaken {
                email: email.to_owned(),
            }),
            // DO UPDATE always returns a row; an empty result means the
            // statement itself misbehaved
            (None, ConflictPolicy::UpdateExisting) => {
                Err(DbError::InsertFailed(sqlx::Error::RowNotFound))
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::DeleteFailed)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            });
        }

        tracing::debug!(%id, "user deleted");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, DbError> {
        self.fetch_one_user(SELECT_BY_ID, Bound::Id(id)).await
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DbError> {
        self.fetch_one_user(LookupField::Email.select_query(), Bound::Text(email))
            .await
    }

    async fn find_by(&self, field: LookupField, value: &str) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query(field.select_query())
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::QueryFailed)?;

        rows.iter()
            .map(|row| user_from_row(row, field.column()))
            .collect()
    }
}

/// Map a row into a [`User`], logging schema mismatches.
fn user_from_row(row: &PgRow, lookup: &str) -> Result<User, DbError> {
    User::from_row(row).map_err(|e| {
        tracing::error!(
            error = %e,
            lookup,
            "user row does not match expected schema"
        );
        DbError::ScanFailed(e)
    })
}
