//! Audit orchestration: retrieve, deduplicate, sort.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::dedup;
use crate::engine::{self, DEFAULT_MAX_REQUESTS, EngineOptions, Interruption};
use crate::query::RateLimit;
use crate::sort::{self, SortColumn};
use crate::traits::QueryExecutor;
use crate::types::{MAX_PAGE_SIZE, Organization, PaginationState, PermissionRecord};

/// What to audit and how.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub organization: Organization,
    pub paginate: bool,
    pub sort_column: SortColumn,
    pub max_requests: u32,
    /// Overall time allowed for the walk.
    pub deadline: Option<Duration>,
    pub repository_page_size: u8,
    pub collaborator_page_size: u8,
}

impl AuditConfig {
    /// Full pagination, sorted by repository.
    pub fn new(organization: Organization) -> Self {
        Self {
            organization,
            paginate: true,
            sort_column: SortColumn::default(),
            max_requests: DEFAULT_MAX_REQUESTS,
            deadline: None,
            repository_page_size: MAX_PAGE_SIZE,
            collaborator_page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_pagination(mut self, paginate: bool) -> Self {
        self.paginate = paginate;
        self
    }

    pub fn with_sort_column(mut self, column: SortColumn) -> Self {
        self.sort_column = column;
        self
    }

    pub fn with_max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_page_sizes(mut self, repositories: u8, collaborators: u8) -> Self {
        self.repository_page_size = repositories;
        self.collaborator_page_size = collaborators;
        self
    }

    fn initial_state(&self) -> PaginationState {
        PaginationState::new(self.organization.clone())
            .with_page_sizes(self.repository_page_size, self.collaborator_page_size)
    }

    fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            paginate: self.paginate,
            max_requests: self.max_requests,
            deadline: self.deadline.map(|d| Instant::now() + d),
        }
    }
}

/// Outcome of an audit.
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub organization: Organization,
    /// Unique records in the requested order.
    pub records: Vec<PermissionRecord>,
    pub requests: u32,
    /// Parts of the organization that could not be retrieved.
    pub interruptions: Vec<Interruption>,
    pub rate_limit: Option<RateLimit>,
}

impl AuditReport {
    /// True when nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.interruptions.is_empty()
    }
}

/// Runs audits against a [`QueryExecutor`].
#[derive(Debug, Clone)]
pub struct Audit<E> {
    executor: E,
}

impl<E: QueryExecutor> Audit<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Retrieve every collaborator of the organization, then deduplicate
    /// and sort.
    ///
    /// Request failures do not fail the audit; they are listed in
    /// [`AuditReport::interruptions`].
    #[instrument(skip_all, fields(organization = %config.organization, sort = %config.sort_column))]
    pub async fn run(&self, config: &AuditConfig) -> AuditReport {
        let harvest =
            engine::retrieve_all(&self.executor, config.initial_state(), &config.engine_options())
                .await;

        let retrieved = harvest.records.len();
        let records = sort::sort(dedup::unique(harvest.records), config.sort_column);

        if harvest.interruptions.is_empty() {
            info!(retrieved, unique = records.len(), "audit complete");
        } else {
            warn!(
                retrieved,
                unique = records.len(),
                interruptions = harvest.interruptions.len(),
                "audit incomplete"
            );
        }

        AuditReport {
            organization: config.organization.clone(),
            records,
            requests: harvest.requests,
            interruptions: harvest.interruptions,
            rate_limit: harvest.rate_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::Result;
    use crate::error::{Error, ProtocolError};
    use crate::query::{OrganizationPayload, QueryVariables};

    /// Serves the two-repository "acme" organization.
    ///
    /// Repo A has two collaborators on one page; repo B has one
    /// collaborator per page over two pages. The collaborator page request
    /// re-fetches the whole batch, so repo A's collaborators come back a
    /// second time.
    #[derive(Default)]
    struct AcmeExecutor {
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl QueryExecutor for AcmeExecutor {
        async fn execute(
            &self,
            _document: &str,
            variables: &QueryVariables,
        ) -> Result<OrganizationPayload> {
            *self.calls.lock().unwrap() += 1;
            assert_eq!(variables.orgname, "acme");
            assert!(variables.end_cursor.is_none());

            let repo_a = json!({
                "nameWithOwner": "acme/a",
                "collaborators": {
                    "edges": [
                        {"permission": "ADMIN", "permissionSources": [
                            {"permission": "ADMIN", "source": {"__typename": "Repository", "nameWithOwner": "acme/a"}}
                        ], "node": {"login": "zoe"}},
                        {"permission": "READ", "permissionSources": [
                            {"permission": "READ", "source": {"__typename": "Organization", "login": "acme"}}
                        ], "node": {"login": "mike"}}
                    ],
                    "pageInfo": {"hasNextPage": false, "endCursor": "a1"}
                }
            });

            let (login, next) = match variables.inner_cursor.as_deref() {
                None => ("yuri", json!({"hasNextPage": true, "endCursor": "b1"})),
                Some("b1") => ("anna", json!({"hasNextPage": false, "endCursor": "b2"})),
                Some(other) => {
                    return Err(Error::Protocol(ProtocolError::new(
                        None,
                        format!("unexpected cursor {}", other),
                    )));
                }
            };
            let repo_b = json!({
                "nameWithOwner": "acme/b",
                "collaborators": {
                    "edges": [{"permission": "WRITE", "permissionSources": [
                        {"permission": "WRITE", "source": {"__typename": "Team", "name": "devs"}}
                    ], "node": {"login": login}}],
                    "pageInfo": next
                }
            });

            Ok(serde_json::from_value(json!({
                "organization": {"repositories": {
                    "nodes": [repo_a, repo_b],
                    "pageInfo": {"hasNextPage": false, "endCursor": "r1"}
                }}
            }))
            .unwrap())
        }
    }

    fn acme() -> Organization {
        Organization::new("acme").unwrap()
    }

    #[tokio::test]
    async fn acme_sorted_by_repository() {
        let audit = Audit::new(AcmeExecutor::default());
        let report = audit.run(&AuditConfig::new(acme())).await;

        assert!(report.is_complete());
        assert_eq!(report.requests, 2);
        assert_eq!(*audit.executor().calls.lock().unwrap(), 2);

        let keys: Vec<_> = report
            .records
            .iter()
            .map(|r| (r.repository.as_str(), r.handle.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("acme/a", "mike"),
                ("acme/a", "zoe"),
                ("acme/b", "anna"),
                ("acme/b", "yuri"),
            ]
        );
        assert_eq!(report.records[3].team_permissions[0].name, "devs");
    }

    #[tokio::test]
    async fn acme_sorted_by_user() {
        let audit = Audit::new(AcmeExecutor::default());
        let config = AuditConfig::new(acme()).with_sort_column(SortColumn::User);
        let report = audit.run(&config).await;

        let handles: Vec<_> = report.records.iter().map(|r| r.handle.as_str()).collect();
        assert_eq!(handles, vec!["anna", "mike", "yuri", "zoe"]);
    }

    #[tokio::test]
    async fn acme_without_pagination() {
        let audit = Audit::new(AcmeExecutor::default());
        let config = AuditConfig::new(acme()).with_pagination(false);
        let report = audit.run(&config).await;

        assert_eq!(report.requests, 1);
        assert_eq!(report.records.len(), 3);
        assert!(report.records.iter().all(|r| r.handle != "anna"));
    }

    struct FailingExecutor;

    #[async_trait]
    impl QueryExecutor for FailingExecutor {
        async fn execute(
            &self,
            _document: &str,
            _variables: &QueryVariables,
        ) -> Result<OrganizationPayload> {
            Err(Error::Protocol(ProtocolError::new(Some(502), "bad gateway")))
        }
    }

    #[tokio::test]
    async fn failure_is_reported_not_raised() {
        let report = Audit::new(FailingExecutor)
            .run(&AuditConfig::new(acme()))
            .await;

        assert!(report.records.is_empty());
        assert!(!report.is_complete());
        assert!(report.interruptions[0].to_string().contains("bad gateway"));
    }
}
