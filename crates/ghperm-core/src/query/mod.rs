//! The organization collaborators query and its response model.

mod convert;
mod document;
mod payload;

pub use document::{ORGANIZATION_COLLABORATORS, QueryVariables};
pub use payload::{
    CollaboratorConnection, CollaboratorEdge, OrganizationNode, OrganizationPayload,
    PermissionSource, PermissionSourceEntry, RateLimit, RepositoryConnection, RepositoryNode,
    UserNode,
};
