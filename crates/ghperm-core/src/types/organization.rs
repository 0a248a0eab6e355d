//! Organization login type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Longest login GitHub accepts for users and organizations.
const MAX_LOGIN_LEN: usize = 39;

/// A validated organization login.
///
/// Logins consist of ASCII alphanumerics and single hyphens, and may not
/// begin or end with a hyphen.
///
/// # Example
///
/// ```
/// use ghperm_core::types::Organization;
///
/// let org = Organization::new("rust-lang").unwrap();
/// assert_eq!(org.as_str(), "rust-lang");
/// assert!(Organization::new("-bad").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Organization(String);

impl Organization {
    /// Create a new organization login, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the login is empty, too long, or contains
    /// characters GitHub does not allow.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the login string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::Organization {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if s.is_empty() {
            return Err(invalid("must be non-empty"));
        }

        if s.len() > MAX_LOGIN_LEN {
            return Err(invalid("must be at most 39 characters"));
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid("may only contain alphanumerics and hyphens"));
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(invalid("may not begin or end with a hyphen"));
        }

        if s.contains("--") {
            return Err(invalid("may not contain consecutive hyphens"));
        }

        Ok(())
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Organization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Organization {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Organization> for String {
    fn from(org: Organization) -> Self {
        org.0
    }
}

impl AsRef<str> for Organization {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_logins() {
        assert!(Organization::new("acme").is_ok());
        assert!(Organization::new("rust-lang").is_ok());
        assert!(Organization::new("Org42").is_ok());
    }

    #[test]
    fn invalid_logins() {
        assert!(Organization::new("").is_err());
        assert!(Organization::new("-acme").is_err());
        assert!(Organization::new("acme-").is_err());
        assert!(Organization::new("ac--me").is_err());
        assert!(Organization::new("acme corp").is_err());
        assert!(Organization::new("a".repeat(40)).is_err());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let org: Organization = serde_json::from_str("\"acme\"").unwrap();
        assert_eq!(org.as_str(), "acme");
        assert!(serde_json::from_str::<Organization>("\"not valid\"").is_err());
    }
}
