//! GraphQL HTTP client implementation.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use ghperm_core::error::{
    AuthError, Error, GraphQlError, GraphQlErrors, InvalidInputError, ProtocolError,
    TransportError,
};
use ghperm_core::{ApiUrl, Result, Token};

/// Request body of a GraphQL call.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

/// Response envelope of a GraphQL call.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<R> {
    data: Option<R>,
    errors: Option<Vec<GraphQlError>>,
}

/// Error body GitHub sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct HttpErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// HTTP client for GraphQL requests.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: reqwest::Client,
    endpoint: ApiUrl,
    token: Token,
}

impl GraphQlClient {
    /// Create a new client for `endpoint`, authenticating with `token`.
    ///
    /// `timeout` bounds each request, connection and body included.
    pub fn new(endpoint: ApiUrl, token: Token, timeout: Option<Duration>) -> Result<Self> {
        if endpoint.is_local() {
            return Err(InvalidInputError::Endpoint {
                value: endpoint.to_string(),
                reason: "file:// endpoints are replayed, not requested over HTTP".to_string(),
            }
            .into());
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("ghperm/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// Returns the endpoint this client is configured for.
    pub fn endpoint(&self) -> &ApiUrl {
        &self.endpoint
    }

    /// Run a GraphQL operation and return its `data`.
    #[instrument(skip(self, document, variables), fields(endpoint = %self.endpoint))]
    pub async fn query<V, R>(&self, document: &str, variables: &V) -> Result<R>
    where
        V: Serialize + std::fmt::Debug + Sync,
        R: DeserializeOwned,
    {
        debug!("GraphQL query");
        trace!(?variables, "query variables");

        let body = GraphQlRequest {
            query: document,
            variables,
        };

        let response = self
            .client
            .post(self.endpoint.as_url().clone())
            .headers(self.auth_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Create authorization headers for requests.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("bearer {}", self.token.as_str()))
            .map_err(|_| InvalidInputError::Other {
                message: "token contains characters not allowed in a header".to_string(),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Handle a GraphQL response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "GraphQL response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            }
            .into());
        }

        if !status.is_success() {
            let message = match response.json::<HttpErrorBody>().await {
                Ok(HttpErrorBody {
                    message: Some(message),
                }) => message,
                _ => status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            };
            return Err(ProtocolError::new(Some(status.as_u16()), message).into());
        }

        let body: GraphQlResponse<R> = response.json().await.map_err(|e| {
            Error::Protocol(ProtocolError::new(
                Some(status.as_u16()),
                format!("malformed response body: {}", e),
            ))
        })?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            return Err(GraphQlErrors(errors).into());
        }

        body.data.ok_or_else(|| {
            ProtocolError::new(Some(status.as_u16()), "response has no data").into()
        })
    }
}
