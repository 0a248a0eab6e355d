//! One-call audit entry points.

use std::time::Duration;

use tracing::info;

use ghperm_core::{ApiUrl, Audit, AuditConfig, AuditReport, Organization, Result, SortColumn, Token};

use crate::executor::GraphQlExecutor;

/// Audit `organization` on GitHub with `token`.
///
/// Only invalid input fails the call; request failures during the walk are
/// reported in [`AuditReport::interruptions`].
///
/// # Example
///
/// ```no_run
/// use ghperm_core::SortColumn;
///
/// # async fn example() -> Result<(), ghperm_core::Error> {
/// let report = ghperm_graphql::run("ghp_...", "acme", true, SortColumn::Repository).await?;
/// for record in &report.records {
///     println!("{} {} {}", record.repository, record.handle, record.permission);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run(
    token: &str,
    organization: &str,
    paginate: bool,
    sort_column: SortColumn,
) -> Result<AuditReport> {
    let config = AuditConfig::new(Organization::new(organization)?)
        .with_pagination(paginate)
        .with_sort_column(sort_column);

    run_with_config(ApiUrl::github()?, Token::new(token)?, &config, None).await
}

/// Audit with full control over endpoint, limits and per-request timeout.
pub async fn run_with_config(
    endpoint: ApiUrl,
    token: Token,
    config: &AuditConfig,
    request_timeout: Option<Duration>,
) -> Result<AuditReport> {
    let executor = GraphQlExecutor::with_timeout(endpoint, token, request_timeout)?;
    info!(endpoint = %executor.endpoint(), organization = %config.organization, "starting audit");

    Ok(Audit::new(executor).run(config).await)
}
