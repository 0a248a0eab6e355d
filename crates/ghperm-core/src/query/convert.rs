//! Conversions from response payloads to [`PermissionRecord`]s.

use crate::types::{PageInfo, Permission, PermissionRecord, TeamPermission, UNKNOWN_REPOSITORY};

use super::payload::{
    CollaboratorEdge, OrganizationPayload, PermissionSource, PermissionSourceEntry,
    RepositoryNode,
};

impl OrganizationPayload {
    /// Repository nodes of this page, skipping `null` entries.
    pub fn repositories(&self) -> impl Iterator<Item = &RepositoryNode> {
        self.organization
            .iter()
            .flat_map(|org| org.repositories.nodes.iter().flatten())
    }

    /// Page info of the repositories connection.
    pub fn repository_page_info(&self) -> Option<&PageInfo> {
        self.organization
            .as_ref()
            .map(|org| &org.repositories.page_info)
    }

    /// Flatten every collaborator edge of every repository into records.
    pub fn records(&self) -> Vec<PermissionRecord> {
        self.repositories()
            .flat_map(RepositoryNode::records)
            .collect()
    }

    /// Cursor of the next repository page.
    pub fn next_outer_cursor(&self) -> Option<&str> {
        self.repository_page_info()
            .and_then(PageInfo::next_cursor)
    }

    /// Cursor of the next collaborator page for this batch.
    ///
    /// The collaborator cursor is shared by every repository in the batch,
    /// so the continuation is taken from the last repository that still
    /// reports more collaborators.
    pub fn next_inner_cursor(&self) -> Option<&str> {
        self.repositories()
            .filter_map(|repo| repo.collaborators.as_ref())
            .filter_map(|conn| conn.page_info.next_cursor())
            .last()
    }
}

impl RepositoryNode {
    /// Repository name, or the `"unknown"` placeholder when absent.
    pub fn repository_name(&self) -> &str {
        self.name_with_owner.as_deref().unwrap_or(UNKNOWN_REPOSITORY)
    }

    /// Records for every collaborator edge of this repository.
    pub fn records(&self) -> Vec<PermissionRecord> {
        let repository = self.repository_name();
        self.collaborators
            .iter()
            .flat_map(|conn| conn.edges.iter().flatten())
            .filter_map(|edge| edge.to_record(repository))
            .collect()
    }
}

impl CollaboratorEdge {
    /// Project this edge onto a record for `repository`.
    ///
    /// Edges without a user node carry no handle and are skipped.
    pub fn to_record(&self, repository: &str) -> Option<PermissionRecord> {
        let Some(user) = &self.node else {
            tracing::trace!(repository, "skipping collaborator edge without a user node");
            return None;
        };

        Some(PermissionRecord {
            repository: repository.to_string(),
            handle: user.login.clone(),
            permission: self.permission.clone(),
            organization_permission: first_matching(&self.permission_sources, |source| {
                matches!(source, PermissionSource::Organization { .. })
            }),
            repository_permission: first_matching(&self.permission_sources, |source| {
                matches!(source, PermissionSource::Repository { .. })
            }),
            team_permissions: self
                .permission_sources
                .iter()
                .filter_map(|entry| match &entry.source {
                    PermissionSource::Team { name } => {
                        Some(TeamPermission::new(name.clone(), entry.permission.clone()))
                    }
                    _ => None,
                })
                .collect(),
        })
    }
}

fn first_matching(
    sources: &[PermissionSourceEntry],
    predicate: impl Fn(&PermissionSource) -> bool,
) -> Option<Permission> {
    sources
        .iter()
        .find(|entry| predicate(&entry.source))
        .map(|entry| entry.permission.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edge(value: serde_json::Value) -> CollaboratorEdge {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn team_and_organization_sources() {
        let edge = edge(json!({
            "permission": "WRITE",
            "permissionSources": [
                {"permission": "WRITE", "source": {"__typename": "Team", "name": "T1"}},
                {"permission": "READ", "source": {"__typename": "Organization", "login": "acme"}}
            ],
            "node": {"login": "alice"}
        }));

        let record = edge.to_record("acme/api").unwrap();
        assert_eq!(record.organization_permission, Some(Permission::new("READ")));
        assert_eq!(record.repository_permission, None);
        assert_eq!(record.team_permissions, vec![TeamPermission::new("T1", "WRITE")]);
    }

    #[test]
    fn first_source_of_each_kind_wins() {
        let edge = edge(json!({
            "permission": "ADMIN",
            "permissionSources": [
                {"permission": "ADMIN", "source": {"__typename": "Repository", "nameWithOwner": "acme/api"}},
                {"permission": "READ", "source": {"__typename": "Repository", "nameWithOwner": "acme/api"}},
                {"permission": "READ", "source": {"__typename": "Organization"}},
                {"permission": "WRITE", "source": {"__typename": "Organization"}}
            ],
            "node": {"login": "bob"}
        }));

        let record = edge.to_record("acme/api").unwrap();
        assert_eq!(record.repository_permission, Some(Permission::new("ADMIN")));
        assert_eq!(record.organization_permission, Some(Permission::new("READ")));
        assert!(record.team_permissions.is_empty());
    }

    #[test]
    fn teams_keep_source_order() {
        let edge = edge(json!({
            "permission": "MAINTAIN",
            "permissionSources": [
                {"permission": "MAINTAIN", "source": {"__typename": "Team", "name": "zeta"}},
                {"permission": "READ", "source": {"__typename": "Enterprise"}},
                {"permission": "TRIAGE", "source": {"__typename": "Team", "name": "alpha"}}
            ],
            "node": {"login": "carol"}
        }));

        let record = edge.to_record("acme/api").unwrap();
        assert_eq!(
            record.team_permissions,
            vec![
                TeamPermission::new("zeta", "MAINTAIN"),
                TeamPermission::new("alpha", "TRIAGE"),
            ]
        );
    }

    #[test]
    fn no_sources_and_no_user() {
        let bare = edge(json!({"permission": "READ", "node": {"login": "dave"}}));
        let record = bare.to_record("acme/api").unwrap();
        assert!(record.organization_permission.is_none());
        assert!(record.repository_permission.is_none());
        assert!(record.team_permissions.is_empty());

        let orphan = edge(json!({"permission": "READ", "permissionSources": [], "node": null}));
        assert!(orphan.to_record("acme/api").is_none());
    }

    #[test]
    fn missing_repository_name_uses_placeholder() {
        let payload: OrganizationPayload = serde_json::from_value(json!({
            "organization": {"repositories": {
                "nodes": [{
                    "nameWithOwner": null,
                    "collaborators": {
                        "edges": [{"permission": "READ", "permissionSources": [], "node": {"login": "erin"}}],
                        "pageInfo": {"hasNextPage": false}
                    }
                }],
                "pageInfo": {"hasNextPage": false}
            }}
        }))
        .unwrap();

        let records = payload.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].repository, "unknown");
    }

    #[test]
    fn continuations() {
        let payload: OrganizationPayload = serde_json::from_value(json!({
            "organization": {"repositories": {
                "nodes": [
                    {"nameWithOwner": "acme/a", "collaborators": {"edges": [], "pageInfo": {"hasNextPage": true, "endCursor": "ca"}}},
                    {"nameWithOwner": "acme/b", "collaborators": {"edges": [], "pageInfo": {"hasNextPage": true, "endCursor": "cb"}}},
                    {"nameWithOwner": "acme/c", "collaborators": {"edges": [], "pageInfo": {"hasNextPage": false, "endCursor": "cc"}}},
                    {"nameWithOwner": "acme/d", "collaborators": null}
                ],
                "pageInfo": {"hasNextPage": true, "endCursor": "r1"}
            }}
        }))
        .unwrap();

        assert_eq!(payload.next_inner_cursor(), Some("cb"));
        assert_eq!(payload.next_outer_cursor(), Some("r1"));

        let empty = OrganizationPayload::default();
        assert_eq!(empty.next_inner_cursor(), None);
        assert_eq!(empty.next_outer_cursor(), None);
        assert!(empty.records().is_empty());
    }
}
