//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::collaborators::CollaboratorsArgs;

/// Audit collaborator permissions across a GitHub organization.
#[derive(Parser, Debug)]
#[command(name = "ghperm")]
#[command(author, version = env!("GHPERM_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every collaborator of every repository in an organization
    Collaborators(CollaboratorsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ghperm", "collaborators", "acme", "-vv", "--json-logs"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json_logs);
    }
}
