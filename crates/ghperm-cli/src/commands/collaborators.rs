//! Collaborators command implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, ValueEnum};
use colored::Colorize;
use tracing::debug;

use ghperm_core::engine::DEFAULT_MAX_REQUESTS;
use ghperm_core::types::GITHUB_GRAPHQL_URL;
use ghperm_core::{ApiUrl, Audit, AuditConfig, AuditReport, Organization, RateLimit, SortColumn, Token};
use ghperm_file::FileExecutor;
use ghperm_graphql::run_with_config;

use crate::output;

#[derive(Args, Debug)]
pub struct CollaboratorsArgs {
    /// Organization login (e.g., rust-lang)
    pub organization: String,

    /// GitHub token with read:org and repo scopes
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Only fetch the first page of repositories and collaborators
    #[arg(long)]
    pub no_paginate: bool,

    /// Column to sort by
    #[arg(long, value_enum, default_value_t = SortArg::Repository)]
    pub sort: SortArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// GraphQL endpoint, or a file:// URL of recorded responses
    #[arg(long, env = "GHPERM_ENDPOINT", default_value = GITHUB_GRAPHQL_URL)]
    pub endpoint: String,

    /// Maximum number of requests before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_REQUESTS)]
    pub max_requests: u32,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Overall time limit in seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Exit successfully even if parts of the organization could not be read
    #[arg(long)]
    pub allow_partial: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Repository,
    User,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Repository => SortColumn::Repository,
            SortArg::User => SortColumn::User,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Csv,
    Json,
}

impl CollaboratorsArgs {
    fn audit_config(&self, organization: Organization) -> AuditConfig {
        let config = AuditConfig::new(organization)
            .with_pagination(!self.no_paginate)
            .with_sort_column(self.sort.into())
            .with_max_requests(self.max_requests);

        match self.deadline {
            Some(secs) => config.with_deadline(Duration::from_secs(secs)),
            None => config,
        }
    }
}

pub async fn run(args: CollaboratorsArgs) -> Result<()> {
    let organization = Organization::new(&args.organization).context("Invalid organization")?;
    let endpoint = ApiUrl::new(&args.endpoint).context("Invalid endpoint URL")?;
    let config = args.audit_config(organization);

    let report = if endpoint.is_local() {
        let executor = FileExecutor::from_url(&endpoint)
            .await
            .context("Failed to load recorded responses")?;
        debug!(source = ?executor.source(), "Replaying recorded responses");
        Audit::new(executor).run(&config).await
    } else {
        let token = args
            .token
            .as_deref()
            .context("No token given. Pass --token or set GITHUB_TOKEN.")?;
        let token = Token::new(token).context("Invalid token")?;

        run_with_config(
            endpoint,
            token,
            &config,
            args.timeout.map(Duration::from_secs),
        )
        .await
        .context("Failed to audit organization")?
    };

    render(&report, args.format)?;
    report_diagnostics(&report);

    if !report.is_complete() && !args.allow_partial {
        bail!(
            "Audit of {} is incomplete: {} part(s) could not be retrieved. \
             Use --allow-partial to accept partial results.",
            report.organization,
            report.interruptions.len()
        );
    }

    Ok(())
}

fn render(report: &AuditReport, format: Format) -> Result<()> {
    match format {
        Format::Json => output::json_pretty(&report.records)?,
        Format::Csv => print!("{}", output::csv(&report.records)),
        Format::Table if report.records.is_empty() => {
            eprintln!("{}", "No collaborators found.".dimmed());
        }
        Format::Table => println!("{}", output::table(&report.records)),
    }
    Ok(())
}

fn report_diagnostics(report: &AuditReport) {
    for interruption in &report.interruptions {
        output::error(&interruption.to_string());
    }
    if !report.is_complete() {
        output::warning("Results are incomplete");
    }

    output::field("Records", &report.records.len().to_string());
    output::field("Requests", &report.requests.to_string());
    if let Some(rate_limit) = &report.rate_limit {
        output::field("Rate limit", &describe_rate_limit(rate_limit));
    }
}

fn describe_rate_limit(rate_limit: &RateLimit) -> String {
    let reset = rate_limit.reset_at.signed_duration_since(Utc::now());
    let reset = if reset.num_seconds() > 0 {
        format!("in {}m {}s", reset.num_minutes(), reset.num_seconds() % 60)
    } else {
        "now".to_string()
    };

    format!(
        "{}/{} remaining (last cost {}), resets {}",
        rate_limit.remaining, rate_limit.limit, rate_limit.cost, reset
    )
}
