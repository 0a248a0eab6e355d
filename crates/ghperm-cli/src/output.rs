//! Output formatting helpers.
//!
//! Records go to stdout; diagnostics go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use ghperm_core::PermissionRecord;

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    eprintln!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

const EMPTY: &str = "-";

#[derive(Debug, Clone, Tabled)]
struct RecordRow {
    #[tabled(rename = "Repository")]
    repository: String,

    #[tabled(rename = "User")]
    user: String,

    #[tabled(rename = "Permission")]
    permission: String,

    #[tabled(rename = "Organization")]
    organization: String,

    #[tabled(rename = "Repository Grant")]
    repository_grant: String,

    #[tabled(rename = "Teams")]
    teams: String,
}

impl From<&PermissionRecord> for RecordRow {
    fn from(record: &PermissionRecord) -> Self {
        let or_empty = |value: Option<String>| value.unwrap_or_else(|| EMPTY.to_string());
        let teams = record.teams_summary();

        Self {
            repository: record.repository.clone(),
            user: record.handle.clone(),
            permission: record.permission.to_string(),
            organization: or_empty(record.organization_permission.as_ref().map(|p| p.to_string())),
            repository_grant: or_empty(record.repository_permission.as_ref().map(|p| p.to_string())),
            teams: if teams.is_empty() {
                EMPTY.to_string()
            } else {
                teams
            },
        }
    }
}

/// Render records as a rounded table.
pub fn table(records: &[PermissionRecord]) -> String {
    let mut table = Table::new(records.iter().map(RecordRow::from));
    table.with(Style::rounded());
    table.to_string()
}

const CSV_HEADER: [&str; 6] = [
    "repository",
    "user",
    "permission",
    "organization_permission",
    "repository_permission",
    "team_permissions",
];

/// Render records as CSV with a header row.
///
/// Fields containing a comma, quote or line break are quoted and embedded
/// quotes doubled. Absent permissions are empty fields.
pub fn csv(records: &[PermissionRecord]) -> String {
    let mut out = String::new();
    push_csv_line(&mut out, CSV_HEADER.iter().copied());

    for record in records {
        let organization = record
            .organization_permission
            .as_ref()
            .map(|p| p.as_str())
            .unwrap_or_default();
        let repository = record
            .repository_permission
            .as_ref()
            .map(|p| p.as_str())
            .unwrap_or_default();
        let teams = record.teams_summary();

        push_csv_line(
            &mut out,
            [
                record.repository.as_str(),
                record.handle.as_str(),
                record.permission.as_str(),
                organization,
                repository,
                teams.as_str(),
            ],
        );
    }

    out
}

fn push_csv_line<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}
