//! Connection page metadata.

use serde::{Deserialize, Serialize};

/// Pagination info for cursor-based pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Returns the cursor of the next page, if there is one to fetch.
    ///
    /// Both `hasNextPage` and a non-null `endCursor` are required; a
    /// connection claiming more pages without a cursor is treated as done.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}
