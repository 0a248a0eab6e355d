//! Subcommand implementations.

pub mod collaborators;
