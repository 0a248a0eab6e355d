//! Structural deduplication of permission records.

use std::collections::HashSet;

use crate::types::PermissionRecord;

/// Collapse records that are equal in every field.
///
/// Overlapping pages (collaborator pages re-fetch the whole repository
/// batch) produce identical records; only the first occurrence is kept.
pub fn unique(records: Vec<PermissionRecord>) -> Vec<PermissionRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        if !seen.contains(&record) {
            seen.insert(record.clone());
            out.push(record);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Permission, TeamPermission};

    fn record(repository: &str, handle: &str, teams: &[(&str, &str)]) -> PermissionRecord {
        PermissionRecord {
            repository: repository.to_string(),
            handle: handle.to_string(),
            permission: Permission::new("WRITE"),
            organization_permission: Some(Permission::new("READ")),
            repository_permission: None,
            team_permissions: teams
                .iter()
                .map(|(name, perm)| TeamPermission::new(*name, *perm))
                .collect(),
        }
    }

    #[test]
    fn removes_identical_records() {
        let records = vec![
            record("acme/a", "alice", &[]),
            record("acme/a", "bob", &[]),
            record("acme/a", "alice", &[]),
        ];

        let out = unique(records);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].handle, "alice");
        assert_eq!(out[1].handle, "bob");
    }

    #[test]
    fn same_repository_and_handle_with_different_breakdown_are_kept() {
        let records = vec![
            record("acme/a", "alice", &[("core", "WRITE")]),
            record("acme/a", "alice", &[("docs", "WRITE")]),
            record("acme/a", "alice", &[("docs", "WRITE"), ("core", "WRITE")]),
            record("acme/a", "alice", &[("core", "WRITE"), ("docs", "WRITE")]),
        ];

        assert_eq!(unique(records).len(), 4);
    }

    #[test]
    fn independently_built_records_collapse() {
        let a = record("acme/a", "alice", &[("core", "WRITE")]);
        let b: PermissionRecord =
            serde_json::from_value(serde_json::to_value(&a).unwrap()).unwrap();

        assert_eq!(unique(vec![a, b]).len(), 1);
    }

    #[test]
    fn idempotent() {
        let records = vec![
            record("acme/b", "carol", &[]),
            record("acme/a", "alice", &[("core", "ADMIN")]),
            record("acme/b", "carol", &[]),
            record("acme/a", "alice", &[("core", "ADMIN")]),
            record("acme/a", "alice", &[]),
        ];

        let once = unique(records);
        let twice = unique(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(unique(Vec::new()).is_empty());
    }
}
