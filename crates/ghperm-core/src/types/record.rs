//! The flattened permission record.

use serde::{Deserialize, Serialize};

use super::{Permission, TeamPermission};

/// Placeholder used when a collaborator edge has no repository reference.
pub const UNKNOWN_REPOSITORY: &str = "unknown";

/// One collaborator's effective access to one repository.
///
/// Records are plain values; two records are the same record iff every
/// field, including the ordered team list, is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    /// Repository in `owner/name` form.
    pub repository: String,
    /// Collaborator login.
    pub handle: String,
    /// Effective permission on the repository.
    pub permission: Permission,
    /// Permission inherited from organization membership.
    pub organization_permission: Option<Permission>,
    /// Permission granted directly on the repository.
    pub repository_permission: Option<Permission>,
    /// Permissions granted through teams, in source order.
    pub team_permissions: Vec<TeamPermission>,
}

impl PermissionRecord {
    /// Returns the team permissions joined as `team:PERM; team:PERM`.
    pub fn teams_summary(&self) -> String {
        self.team_permissions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
