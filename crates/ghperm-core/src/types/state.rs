//! Pagination state snapshots.

use super::Organization;

/// Largest page size the GraphQL API accepts for a connection.
pub const MAX_PAGE_SIZE: u8 = 100;

/// A position in the nested repositories → collaborators connection.
///
/// States are immutable snapshots: advancing either cursor derives a new
/// state and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    organization: Organization,
    outer_cursor: Option<String>,
    inner_cursor: Option<String>,
    repository_page_size: u8,
    collaborator_page_size: u8,
}

impl PaginationState {
    /// Create the initial state for an organization, with both cursors unset.
    pub fn new(organization: Organization) -> Self {
        Self {
            organization,
            outer_cursor: None,
            inner_cursor: None,
            repository_page_size: MAX_PAGE_SIZE,
            collaborator_page_size: MAX_PAGE_SIZE,
        }
    }

    /// Set the page sizes, clamped to `1..=100`.
    pub fn with_page_sizes(mut self, repositories: u8, collaborators: u8) -> Self {
        self.repository_page_size = repositories.clamp(1, MAX_PAGE_SIZE);
        self.collaborator_page_size = collaborators.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Derive the state for the next repository page.
    ///
    /// The inner cursor is reset: collaborators of the new batch start
    /// from their first page.
    pub fn with_outer_cursor(&self, cursor: impl Into<String>) -> Self {
        Self {
            outer_cursor: Some(cursor.into()),
            inner_cursor: None,
            ..self.clone()
        }
    }

    /// Derive the state for the next collaborator page of the current batch.
    pub fn with_inner_cursor(&self, cursor: impl Into<String>) -> Self {
        Self {
            inner_cursor: Some(cursor.into()),
            ..self.clone()
        }
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn outer_cursor(&self) -> Option<&str> {
        self.outer_cursor.as_deref()
    }

    pub fn inner_cursor(&self) -> Option<&str> {
        self.inner_cursor.as_deref()
    }

    pub fn repository_page_size(&self) -> u8 {
        self.repository_page_size
    }

    pub fn collaborator_page_size(&self) -> u8 {
        self.collaborator_page_size
    }
}
