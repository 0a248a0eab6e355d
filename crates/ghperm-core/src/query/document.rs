//! Query document and variables.

use serde::Serialize;

use crate::types::PaginationState;

/// Repositories of an organization with each repository's collaborators,
/// the provenance of every collaborator's permission, and both page infos.
///
/// Page sizes are variables so the document itself never changes at runtime.
pub const ORGANIZATION_COLLABORATORS: &str = r#"query OrganizationCollaborators(
  $orgname: String!
  $endCursor: String
  $innerCursor: String
  $repositoryPageSize: Int!
  $collaboratorPageSize: Int!
) {
  organization(login: $orgname) {
    repositories(first: $repositoryPageSize, after: $endCursor) {
      nodes {
        nameWithOwner
        description
        url
        collaborators(first: $collaboratorPageSize, after: $innerCursor) {
          edges {
            permission
            permissionSources {
              permission
              source {
                __typename
                ... on Organization {
                  login
                }
                ... on Repository {
                  nameWithOwner
                }
                ... on Team {
                  name
                }
              }
            }
            node {
              login
            }
          }
          pageInfo {
            hasNextPage
            endCursor
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
  rateLimit {
    limit
    cost
    remaining
    resetAt
  }
}"#;

/// Variables for [`ORGANIZATION_COLLABORATORS`].
///
/// Unset cursors serialize as `null`, which the API reads as "first page".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    pub orgname: String,
    pub end_cursor: Option<String>,
    pub inner_cursor: Option<String>,
    pub repository_page_size: u8,
    pub collaborator_page_size: u8,
}

impl From<&PaginationState> for QueryVariables {
    fn from(state: &PaginationState) -> Self {
        Self {
            orgname: state.organization().as_str().to_string(),
            end_cursor: state.outer_cursor().map(str::to_string),
            inner_cursor: state.inner_cursor().map(str::to_string),
            repository_page_size: state.repository_page_size(),
            collaborator_page_size: state.collaborator_page_size(),
        }
    }
}
