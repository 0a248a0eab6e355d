//! Dual-cursor pagination.
//!
//! The organization query nests two connections: repositories (the outer
//! cursor) and each repository's collaborators (the inner cursor). One
//! outer page is fetched, then every further collaborator page of that
//! batch, then the next outer page, and so on. Each request yields its own
//! [`Harvest`], which the walk concatenates in request order.
//!
//! A failed request never aborts the walk. It is logged, recorded as an
//! [`Interruption`], and its subtree contributes no records; everything
//! gathered elsewhere is kept. Running out of request budget or time stops
//! the walk.

use std::fmt;

use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::query::{ORGANIZATION_COLLABORATORS, OrganizationPayload, QueryVariables, RateLimit};
use crate::traits::QueryExecutor;
use crate::types::{PaginationState, PermissionRecord};

/// Default ceiling on the number of requests a single walk may issue.
pub const DEFAULT_MAX_REQUESTS: u32 = 10_000;

/// Knobs for a pagination walk.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Follow `hasNextPage` on either connection. When false exactly one
    /// request is issued.
    pub paginate: bool,
    /// Total request budget; guards against an API that never reports the
    /// last page.
    pub max_requests: u32,
    /// No request is started (or allowed to finish) after this instant.
    pub deadline: Option<Instant>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            paginate: true,
            max_requests: DEFAULT_MAX_REQUESTS,
            deadline: None,
        }
    }
}

/// Why part of the connection was not retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interruption {
    /// The request for this position failed.
    Failed {
        outer_cursor: Option<String>,
        inner_cursor: Option<String>,
        message: String,
    },
    /// The request budget ran out before this position was fetched.
    BudgetExhausted {
        outer_cursor: Option<String>,
        inner_cursor: Option<String>,
    },
    /// The deadline passed before this position was fetched.
    DeadlineExceeded {
        outer_cursor: Option<String>,
        inner_cursor: Option<String>,
    },
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (what, outer, inner) = match self {
            Interruption::Failed {
                outer_cursor,
                inner_cursor,
                message,
            } => (format!("request failed: {}", message), outer_cursor, inner_cursor),
            Interruption::BudgetExhausted {
                outer_cursor,
                inner_cursor,
            } => ("request budget exhausted".to_string(), outer_cursor, inner_cursor),
            Interruption::DeadlineExceeded {
                outer_cursor,
                inner_cursor,
            } => ("deadline exceeded".to_string(), outer_cursor, inner_cursor),
        };
        write!(
            f,
            "{} (repositories after {}, collaborators after {})",
            what,
            outer.as_deref().unwrap_or("start"),
            inner.as_deref().unwrap_or("start")
        )
    }
}

/// Records gathered by a walk, plus how the walk ended.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    /// Flattened records in retrieval order; may contain duplicates.
    pub records: Vec<PermissionRecord>,
    /// Requests issued, failed ones included.
    pub requests: u32,
    /// Positions that could not be retrieved. Empty on a complete walk.
    pub interruptions: Vec<Interruption>,
    /// Most recent rate limit observation.
    pub rate_limit: Option<RateLimit>,
}

impl Harvest {
    fn interrupted(interruption: Interruption) -> Self {
        Self {
            interruptions: vec![interruption],
            ..Self::default()
        }
    }

    /// True when every page reachable from the initial state was retrieved.
    pub fn is_complete(&self) -> bool {
        self.interruptions.is_empty()
    }

    /// Concatenate a later harvest onto this one.
    pub fn append(mut self, later: Harvest) -> Self {
        self.records.extend(later.records);
        self.requests += later.requests;
        self.interruptions.extend(later.interruptions);
        if later.rate_limit.is_some() {
            self.rate_limit = later.rate_limit;
        }
        self
    }
}

/// Retrieve every record reachable from `state`.
///
/// Never fails: request errors are contained in the returned
/// [`Harvest::interruptions`].
#[instrument(skip_all, fields(organization = %state.organization(), paginate = options.paginate))]
pub async fn retrieve_all<E>(executor: &E, state: PaginationState, options: &EngineOptions) -> Harvest
where
    E: QueryExecutor + ?Sized,
{
    let mut harvest = Harvest::default();
    let mut outer = state;

    'walk: loop {
        let budget = options.max_requests.saturating_sub(harvest.requests);
        let (page, outcome) = fetch_page(executor, &outer, options, budget).await;
        harvest = harvest.append(page);

        let Outcome::Page(payload) = outcome else {
            break;
        };
        if !options.paginate {
            break;
        }

        // Collaborator pages re-fetch the same repository batch; only
        // their inner continuation is followed here.
        let mut next_inner = payload.next_inner_cursor().map(str::to_string);
        while let Some(cursor) = next_inner.take() {
            let budget = options.max_requests.saturating_sub(harvest.requests);
            let state = outer.with_inner_cursor(cursor);
            let (page, outcome) = fetch_page(executor, &state, options, budget).await;
            harvest = harvest.append(page);

            match outcome {
                Outcome::Page(inner) => {
                    next_inner = inner.next_inner_cursor().map(str::to_string);
                }
                Outcome::Failed => {}
                Outcome::Stopped => break 'walk,
            }
        }

        match payload.next_outer_cursor() {
            Some(cursor) => outer = outer.with_outer_cursor(cursor),
            None => break,
        }
    }

    info!(
        records = harvest.records.len(),
        requests = harvest.requests,
        interruptions = harvest.interruptions.len(),
        "retrieval finished"
    );

    harvest
}

/// What a single request produced besides its records.
enum Outcome {
    Page(OrganizationPayload),
    /// The request failed; its subtree is skipped.
    Failed,
    /// No request was made or it was cut off; the walk ends.
    Stopped,
}

/// Issue a single request for `state`.
async fn fetch_page<E>(
    executor: &E,
    state: &PaginationState,
    options: &EngineOptions,
    budget: u32,
) -> (Harvest, Outcome)
where
    E: QueryExecutor + ?Sized,
{
    let outer_cursor = state.outer_cursor().map(str::to_string);
    let inner_cursor = state.inner_cursor().map(str::to_string);

    if budget == 0 {
        warn!(?outer_cursor, ?inner_cursor, "request budget exhausted, stopping");
        return (
            Harvest::interrupted(Interruption::BudgetExhausted {
                outer_cursor,
                inner_cursor,
            }),
            Outcome::Stopped,
        );
    }

    let deadline_exceeded = || {
        warn!(?outer_cursor, ?inner_cursor, "deadline exceeded, stopping");
        Harvest::interrupted(Interruption::DeadlineExceeded {
            outer_cursor: outer_cursor.clone(),
            inner_cursor: inner_cursor.clone(),
        })
    };

    if let Some(deadline) = options.deadline
        && Instant::now() >= deadline
    {
        return (deadline_exceeded(), Outcome::Stopped);
    }

    let variables = QueryVariables::from(state);
    debug!(?outer_cursor, ?inner_cursor, "fetching page");

    let request = executor.execute(ORGANIZATION_COLLABORATORS, &variables);
    let result = match options.deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, request).await {
            Ok(result) => result,
            Err(_) => {
                let mut harvest = deadline_exceeded();
                harvest.requests = 1;
                return (harvest, Outcome::Stopped);
            }
        },
        None => request.await,
    };

    match result {
        Ok(payload) => {
            if let Some(rate) = &payload.rate_limit {
                info!(
                    limit = rate.limit,
                    cost = rate.cost,
                    remaining = rate.remaining,
                    reset_at = %rate.reset_at,
                    "rate limit"
                );
            }

            let records = payload.records();
            debug!(records = records.len(), "page retrieved");

            let harvest = Harvest {
                records,
                requests: 1,
                interruptions: Vec::new(),
                rate_limit: payload.rate_limit.clone(),
            };
            (harvest, Outcome::Page(payload))
        }
        Err(error) => {
            warn!(%error, ?outer_cursor, ?inner_cursor, "query failed, skipping branch");
            let harvest = Harvest {
                requests: 1,
                ..Harvest::interrupted(Interruption::Failed {
                    outer_cursor,
                    inner_cursor,
                    message: error.to_string(),
                })
            };
            (harvest, Outcome::Failed)
        }
    }
}
