//! ghperm-core - Core types, traits and pagination engine.
//!
//! The crate walks an organization's repositories and their collaborators
//! through any [`QueryExecutor`], flattening the nested GraphQL pages into
//! [`PermissionRecord`]s that are then deduplicated and sorted.

pub mod audit;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod query;
pub mod sort;
pub mod token;
pub mod traits;
pub mod types;

pub use audit::{Audit, AuditConfig, AuditReport};
pub use engine::{EngineOptions, Harvest, Interruption, retrieve_all};
pub use error::Error;
pub use query::{OrganizationPayload, QueryVariables, RateLimit};
pub use sort::SortColumn;
pub use token::Token;
pub use traits::QueryExecutor;
pub use types::{
    ApiUrl, Organization, PageInfo, PaginationState, Permission, PermissionRecord, TeamPermission,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
