//! Error types for ghperm.
//!
//! A single error type with explicit variants for transport, authentication,
//! protocol, GraphQL and input validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for ghperm operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing, invalid or under-scoped token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (unexpected HTTP status, malformed response body).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The server answered with a GraphQL `errors` list.
    #[error("GraphQL error: {0}")]
    GraphQl(#[from] GraphQlErrors),

    /// Input validation errors (endpoint URL, token, organization name).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local I/O failure (replay files).
    #[error("I/O error: {message}")]
    Io { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token was supplied.
    #[error("missing token")]
    MissingToken,

    /// The server rejected the token.
    #[error("token rejected (HTTP {status})")]
    Rejected { status: u16 },
}

/// Protocol-level errors from GraphQL responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code, if the error came from an HTTP exchange.
    pub status: Option<u16>,
    /// Description of what went wrong.
    pub message: String,
}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "HTTP {}: ", status)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProtocolError {}

/// A single entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

/// The non-empty `errors` array of a GraphQL response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlErrors(pub Vec<GraphQlError>);

impl GraphQlErrors {
    /// Returns true if any entry carries the given error type (e.g. `NOT_FOUND`).
    pub fn has_kind(&self, kind: &str) -> bool {
        self.0.iter().any(|e| e.kind.as_deref() == Some(kind))
    }
}

impl fmt::Display for GraphQlErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            match &error.kind {
                Some(kind) => write!(f, "[{}] {}", kind, error.message)?,
                None => write!(f, "{}", error.message)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for GraphQlErrors {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API endpoint URL.
    #[error("invalid endpoint URL '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// Invalid organization login.
    #[error("invalid organization '{value}': {reason}")]
    Organization { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
