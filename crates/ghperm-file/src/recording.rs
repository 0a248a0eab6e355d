//! On-disk recording format.

use serde::{Deserialize, Serialize};

use ghperm_core::error::GraphQlError;
use ghperm_core::query::{OrganizationPayload, QueryVariables};

/// A set of recorded query exchanges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub responses: Vec<RecordedExchange>,
}

impl Recording {
    /// Find the exchange recorded for `variables`.
    ///
    /// The first matching entry wins.
    pub fn find(&self, variables: &QueryVariables) -> Option<&RecordedExchange> {
        self.responses
            .iter()
            .find(|exchange| exchange.variables.matches(variables))
    }
}

/// One request position and the response it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedExchange {
    #[serde(default)]
    pub variables: RecordedVariables,
    pub response: RecordedResponse,
}

/// The variables a recorded response answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orgname: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub inner_cursor: Option<String>,
}

impl RecordedVariables {
    pub fn matches(&self, variables: &QueryVariables) -> bool {
        let same_org = self
            .orgname
            .as_deref()
            .is_none_or(|org| org == variables.orgname);

        same_org
            && self.end_cursor == variables.end_cursor
            && self.inner_cursor == variables.inner_cursor
    }
}

/// A GraphQL response body as the API returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedResponse {
    #[serde(default)]
    pub data: Option<OrganizationPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}
