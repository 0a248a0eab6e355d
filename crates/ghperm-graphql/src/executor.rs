//! GraphQL-backed query executor.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use ghperm_core::query::{OrganizationPayload, QueryVariables};
use ghperm_core::traits::QueryExecutor;
use ghperm_core::{ApiUrl, Result, Token};

use crate::client::GraphQlClient;

/// A network-backed executor that posts queries to a GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlExecutor {
    client: GraphQlClient,
}

impl GraphQlExecutor {
    /// Create an executor bound to `token`.
    pub fn new(endpoint: ApiUrl, token: Token) -> Result<Self> {
        Self::with_timeout(endpoint, token, None)
    }

    /// Create an executor whose requests time out after `timeout`.
    pub fn with_timeout(endpoint: ApiUrl, token: Token, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: GraphQlClient::new(endpoint, token, timeout)?,
        })
    }

    /// Returns the endpoint queries are sent to.
    pub fn endpoint(&self) -> &ApiUrl {
        self.client.endpoint()
    }
}

#[async_trait]
impl QueryExecutor for GraphQlExecutor {
    #[instrument(skip(self, document), fields(organization = %variables.orgname))]
    async fn execute(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<OrganizationPayload> {
        debug!(
            end_cursor = ?variables.end_cursor,
            inner_cursor = ?variables.inner_cursor,
            "Executing organization query"
        );
        self.client.query(document, variables).await
    }
}
