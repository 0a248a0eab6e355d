//! Ordering of permission records.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};
use crate::types::PermissionRecord;

/// Primary sort key. The other of repository and handle breaks ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// Repository, then handle.
    #[default]
    Repository,
    /// Handle, then repository.
    User,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Repository => "repository",
            SortColumn::User => "user",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repository" => Ok(SortColumn::Repository),
            "user" => Ok(SortColumn::User),
            other => Err(InvalidInputError::Other {
                message: format!("unknown sort column '{}'", other),
            }
            .into()),
        }
    }
}

/// Human-friendly string order: case-insensitive first, exact bytes to
/// break the remaining ties so the order stays total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Compare two records by `column`, then by the other key.
pub fn compare(a: &PermissionRecord, b: &PermissionRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Repository => compare_text(&a.repository, &b.repository)
            .then_with(|| compare_text(&a.handle, &b.handle)),
        SortColumn::User => compare_text(&a.handle, &b.handle)
            .then_with(|| compare_text(&a.repository, &b.repository)),
    }
}

/// Stable sort of `records` by `column`.
pub fn sort(mut records: Vec<PermissionRecord>, column: SortColumn) -> Vec<PermissionRecord> {
    records.sort_by(|a, b| compare(a, b, column));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Permission;

    fn record(repository: &str, handle: &str, permission: &str) -> PermissionRecord {
        PermissionRecord {
            repository: repository.to_string(),
            handle: handle.to_string(),
            permission: Permission::new(permission),
            organization_permission: None,
            repository_permission: None,
            team_permissions: Vec::new(),
        }
    }

    fn sample() -> Vec<PermissionRecord> {
        vec![
            record("acme/web", "bob", "READ"),
            record("acme/api", "Carol", "WRITE"),
            record("acme/web", "alice", "ADMIN"),
            record("acme/API-docs", "bob", "READ"),
            record("acme/api", "alice", "READ"),
            record("acme/api", "alice", "ADMIN"),
        ]
    }

    fn assert_ordered(records: &[PermissionRecord], column: SortColumn) {
        for pair in records.windows(2) {
            assert_ne!(
                compare(&pair[0], &pair[1], column),
                Ordering::Greater,
                "{:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn by_repository_then_handle() {
        let sorted = sort(sample(), SortColumn::Repository);
        assert_ordered(&sorted, SortColumn::Repository);

        let keys: Vec<_> = sorted
            .iter()
            .map(|r| (r.repository.as_str(), r.handle.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("acme/api", "alice"),
                ("acme/api", "alice"),
                ("acme/api", "Carol"),
                ("acme/API-docs", "bob"),
                ("acme/web", "alice"),
                ("acme/web", "bob"),
            ]
        );
    }

    #[test]
    fn by_user_then_repository() {
        let sorted = sort(sample(), SortColumn::User);
        assert_ordered(&sorted, SortColumn::User);

        let keys: Vec<_> = sorted
            .iter()
            .map(|r| (r.handle.as_str(), r.repository.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("alice", "acme/api"),
                ("alice", "acme/api"),
                ("alice", "acme/web"),
                ("bob", "acme/API-docs"),
                ("bob", "acme/web"),
                ("Carol", "acme/api"),
            ]
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let sorted = sort(sample(), SortColumn::Repository);
        // Both acme/api:alice records, in their original relative order.
        assert_eq!(sorted[0].permission, "READ");
        assert_eq!(sorted[1].permission, "ADMIN");
    }

    #[test]
    fn case_only_differences_are_ordered() {
        assert_eq!(compare_text("alice", "Alice"), Ordering::Greater);
        assert_eq!(compare_text("Alice", "bob"), Ordering::Less);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
    }

    #[test]
    fn parses_column_names() {
        assert_eq!("user".parse::<SortColumn>().unwrap(), SortColumn::User);
        assert_eq!(
            "repository".parse::<SortColumn>().unwrap(),
            SortColumn::Repository
        );
        assert!("stars".parse::<SortColumn>().is_err());
    }
}
