//! Permission values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A repository permission level as reported by the API.
///
/// The value is passed through verbatim (`READ`, `TRIAGE`, `WRITE`,
/// `MAINTAIN`, `ADMIN`, ...); no normalization is applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A permission granted through membership of a team.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamPermission {
    /// Team name.
    pub name: String,
    /// Permission the team grants on the repository.
    pub permission: Permission,
}

impl TeamPermission {
    pub fn new(name: impl Into<String>, permission: impl Into<Permission>) -> Self {
        Self {
            name: name.into(),
            permission: permission.into(),
        }
    }
}

impl fmt::Display for TeamPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.permission)
    }
}
