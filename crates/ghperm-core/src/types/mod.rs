//! Core ghperm types.
//!
//! Value types produced by the pagination engine and the snapshots it uses
//! to address a position in the nested connection.

mod api_url;
mod organization;
mod page_info;
mod permission;
mod record;
mod state;

pub use api_url::{ApiUrl, GITHUB_GRAPHQL_URL};
pub use organization::Organization;
pub use page_info::PageInfo;
pub use permission::{Permission, TeamPermission};
pub use record::{PermissionRecord, UNKNOWN_REPOSITORY};
pub use state::{MAX_PAGE_SIZE, PaginationState};
