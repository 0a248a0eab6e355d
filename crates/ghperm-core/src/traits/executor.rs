//! Query executor trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::query::{OrganizationPayload, QueryVariables};

/// Something that can run the organization collaborators query.
///
/// Implementations own transport concerns (authentication, HTTP, replay
/// from disk); the pagination engine only sees typed payloads or errors.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `document` with `variables` and return the `data` payload.
    ///
    /// # Errors
    ///
    /// Fails on transport, authentication, protocol or GraphQL errors.
    async fn execute(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<OrganizationPayload>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    async fn execute(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<OrganizationPayload> {
        (**self).execute(document, variables).await
    }
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn execute(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<OrganizationPayload> {
        (**self).execute(document, variables).await
    }
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Box<T> {
    async fn execute(
        &self,
        document: &str,
        variables: &QueryVariables,
    ) -> Result<OrganizationPayload> {
        (**self).execute(document, variables).await
    }
}
