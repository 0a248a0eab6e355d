//! ghperm-graphql - GraphQL-over-HTTP executor.
//!
//! Sends the collaborators query to a GraphQL endpoint with bearer
//! authentication and exposes the one-call [`run`] entry point.

mod client;
mod executor;
mod run;

pub use client::GraphQlClient;
pub use executor::GraphQlExecutor;
pub use run::{run, run_with_config};
