//! Response model for the organization collaborators query.
//!
//! GraphQL lists may contain `null` entries and nullable objects may be
//! `null` when the token lacks access; both are modelled explicitly so a
//! partially visible organization still deserializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{PageInfo, Permission};

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `data` object of a query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPayload {
    /// `null` when the organization does not exist or is not visible.
    #[serde(default)]
    pub organization: Option<OrganizationNode>,
    #[serde(default)]
    pub rate_limit: Option<RateLimit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationNode {
    pub repositories: RepositoryConnection,
}

/// The outer connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<Option<RepositoryNode>>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    #[serde(default)]
    pub name_with_owner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// `null` when the token cannot list this repository's collaborators.
    #[serde(default)]
    pub collaborators: Option<CollaboratorConnection>,
}

/// The inner connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorConnection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<Option<CollaboratorEdge>>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorEdge {
    pub permission: Permission,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permission_sources: Vec<PermissionSourceEntry>,
    #[serde(default)]
    pub node: Option<UserNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNode {
    pub login: String,
}

/// One reason a collaborator holds a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSourceEntry {
    pub permission: Permission,
    pub source: PermissionSource,
}

/// Where a permission comes from, discriminated by the GraphQL `__typename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum PermissionSource {
    /// Base permission from organization membership.
    Organization {
        #[serde(default)]
        login: Option<String>,
    },
    /// Direct grant on the repository.
    Repository {
        #[serde(default, rename = "nameWithOwner")]
        name_with_owner: Option<String>,
    },
    /// Grant through a team.
    Team {
        #[serde(default)]
        name: String,
    },
    /// A source type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Rate limit status reported alongside every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub limit: u32,
    pub cost: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}
