//! New-user validation
//!
//! The repository stores whatever it is given; handlers build a `NewUser`
//! first so empty or malformed fields never reach the database.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for any user text field
const MAX_FIELD_LEN: usize = 255;

/// One `@` with something on both sides, no whitespace
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("invalid email regex"));

/// Validated input for user creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    first_name: String,
    last_name: String,
    email: String,
}

impl NewUser {
    /// Validate and trim the three user fields.
    ///
    /// # Example
    /// ```
    /// use usersvc_server::models::NewUser;
    ///
    /// assert!(NewUser::new("Jenny", "Kim", "jennykim12@gmail.com").is_ok());
    /// assert!(NewUser::new("", "Kim", "jennykim12@gmail.com").is_err());
    /// assert!(NewUser::new("Jenny", "Kim", "not-an-email").is_err());
    /// ```
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Result<Self, ValidationError> {
        let first_name = text_field("first_name", first_name)?;
        let last_name = text_field("last_name", last_name)?;
        let email = text_field("email", email)?;

        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain",
            });
        }

        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

fn text_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LEN,
        });
    }
    Ok(value)
}
