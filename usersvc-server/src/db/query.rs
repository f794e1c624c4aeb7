//! Lookup query construction with a closed column allow-list
//!
//! SQL identifiers cannot be bound as parameters, so a caller-chosen column
//! has to be mapped through [`LookupField`] before it reaches the query text.
//! Every query string here is assembled at compile time; the match value is
//! always bound as `$1`.

use std::fmt;
use std::str::FromStr;

use super::DbError;

/// Expands to a complete user SELECT filtered on one hard-coded column.
macro_rules! select_users_where {
    ($column:literal) => {
        concat!(
            "SELECT id, first_name, last_name, email FROM users WHERE ",
            $column,
            " = $1 ORDER BY id"
        )
    };
}

/// Lookup by primary key. The column is fixed by the operation, so it
/// does not pass through the allow-list.
pub(crate) const SELECT_BY_ID: &str = select_users_where!("id");

/// Columns a caller may look users up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    FirstName,
    LastName,
    Email,
}

impl LookupField {
    /// Every permitted lookup field.
    pub const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::Email];

    /// Column identifier as it appears in the `users` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
        }
    }

    /// Whether the column identifies at most one row.
    pub fn is_unique(self) -> bool {
        matches!(self, Self::Email)
    }

    /// Parameterized SELECT for this field; bind the match value as `$1`.
    ///
    /// # Example
    /// ```
    /// use usersvc_server::db::LookupField;
    ///
    /// let sql = LookupField::LastName.select_query();
    /// assert!(sql.ends_with("WHERE last_name = $1 ORDER BY id"));
    /// ```
    pub fn select_query(self) -> &'static str {
        match self {
            Self::FirstName => select_users_where!("first_name"),
            Self::LastName => select_users_where!("last_name"),
            Self::Email => select_users_where!("email"),
        }
    }
}

impl FromStr for LookupField {
    type Err = DbError;

    /// Exact, case-sensitive match against the allow-list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| DbError::InvalidColumn(s.to_owned()))
    }
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allow_listed_columns() {
        assert_eq!("first_name".parse::<LookupField>().unwrap(), LookupField::FirstName);
        assert_eq!("last_name".parse::<LookupField>().unwrap(), LookupField::LastName);
        assert_eq!("email".parse::<LookupField>().unwrap(), LookupField::Email);
    }

    #[test]
    fn rejects_unknown_columns() {
        for column in [
            "id",
            "password",
            "",
            "users",
            "email; DROP TABLE users; --",
            "email OR 1=1",
            "first_name ",
            " email",
        ] {
            let err = column.parse::<LookupField>().unwrap_err();
            assert!(
                matches!(&err, DbError::InvalidColumn(c) if c == column),
                "expected InvalidColumn for {column:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        for column in ["Email", "EMAIL", "First_Name", "LAST_NAME"] {
            assert!(column.parse::<LookupField>().is_err(), "{column} accepted");
        }
    }

    #[test]
    fn queries_bind_value_as_parameter() {
        for field in LookupField::ALL {
            let sql = field.select_query();
            assert_eq!(
                sql,
                format!(
                    "SELECT id, first_name, last_name, email FROM users WHERE {} = $1 ORDER BY id",
                    field.column()
                )
            );
            assert_eq!(sql.matches('$').count(), 1);
        }
    }

    #[test]
    fn id_query_is_fixed() {
        assert_eq!(
            SELECT_BY_ID,
            "SELECT id, first_name, last_name, email FROM users WHERE id = $1 ORDER BY id"
        );
    }

    #[test]
    fn only_email_is_unique() {
        assert!(LookupField::Email.is_unique());
        assert!(!LookupField::FirstName.is_unique());
        assert!(!LookupField::LastName.is_unique());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for field in LookupField::ALL {
            assert_eq!(field.to_string().parse::<LookupField>().unwrap(), field);
        }
    }
}
