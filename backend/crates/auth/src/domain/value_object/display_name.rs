//! Display Name Value Object
//!
//! The learner's human-readable name. When signup gives no name it is
//! derived from the email's local part: `"john.doe@x.io"` becomes
//! `"John.Doe"`.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use super::email::Email;

/// Maximum length in characters
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Display name value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create from user input (trimmed, 1..=100 characters)
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::bad_request("Name cannot be empty"));
        }
        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    /// Derive from the local part of an email, title-cased
    pub fn from_email(email: &Email) -> Self {
        Self(title_case(email.local_part()))
    }

    /// Use the hint when it is a usable name, otherwise derive from the email
    pub fn from_hint_or_email(hint: Option<&str>, email: &Email) -> Self {
        hint.and_then(|h| Self::new(h).ok())
            .unwrap_or_else(|| Self::from_email(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
///
/// Any non-letter (digit, `.`, `_`, `-`, ...) starts a new run.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("john"), "John");
        assert_eq!(title_case("john.doe"), "John.Doe");
        assert_eq!(title_case("jane_smith99"), "Jane_Smith99");
        assert_eq!(title_case("a1b"), "A1B");
        assert_eq!(title_case("mcDONALD"), "Mcdonald");
        assert_eq!(title_case("42"), "42");
    }

    #[test]
    fn test_from_email() {
        let email = Email::new("mary-ann.lee@example.com").unwrap();
        assert_eq!(DisplayName::from_email(&email).as_str(), "Mary-Ann.Lee");
    }

    #[test]
    fn test_hint_wins_when_usable() {
        let email = Email::new("ada@example.com").unwrap();
        let name = DisplayName::from_hint_or_email(Some("  Ada Lovelace "), &email);
        assert_eq!(name.as_str(), "Ada Lovelace");

        let name = DisplayName::from_hint_or_email(Some("   "), &email);
        assert_eq!(name.as_str(), "Ada");

        let name = DisplayName::from_hint_or_email(None, &email);
        assert_eq!(name.as_str(), "Ada");
    }

    #[test]
    fn test_length_limit() {
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH)).is_ok());
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
    }
}
