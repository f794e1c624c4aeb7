//! Data-access error taxonomy

/// Database error type
///
/// Store errors are wrapped, never discarded, so handlers can log them.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Caller asked for a column outside the lookup allow-list.
    /// No query was executed.
    #[error("invalid column name: {0}")]
    InvalidColumn(String),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Strict conflict policy: the email is already registered.
    #[error("email already registered: {email}")]
    EmailTaken { email: String },

    #[error("failed to insert user: {0}")]
    InsertFailed(#[source] sqlx::Error),

    #[error("failed to delete user: {0}")]
    DeleteFailed(#[source] sqlx::Error),

    #[error("failed to execute query: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// Returned row did not match the `User` shape (schema drift).
    #[error("failed to retrieve user: {0}")]
    ScanFailed(#[source] sqlx::Error),
}

impl DbError {
    /// Whether a caller may reasonably retry the operation.
    ///
    /// The repository itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InsertFailed(_) | Self::DeleteFailed(_) | Self::QueryFailed(_)
        )
    }
}
