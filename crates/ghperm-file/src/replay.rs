//! Replaying executor.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use ghperm_core::error::{Error, GraphQlErrors, InvalidInputError, ProtocolError, TransportError};
use ghperm_core::query::{OrganizationPayload, QueryVariables};
use ghperm_core::traits::QueryExecutor;
use ghperm_core::{ApiUrl, Result};

use crate::recording::Recording;

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Transport(TransportError::Io {
        message: format!("{}: {}", path.display(), err),
    })
}

/// A [`QueryExecutor`] that answers from a [`Recording`].
#[derive(Debug, Clone)]
pub struct FileExecutor {
    source: Option<PathBuf>,
    recording: Recording,
}

impl FileExecutor {
    /// Serve an in-memory recording.
    pub fn new(recording: Recording) -> Self {
        Self {
            source: None,
            recording,
        }
    }

    /// Load the recording stored at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path).await.map_err(|e| map_io(path, e))?;
        let recording: Recording = serde_json::from_slice(&raw).map_err(|e| {
            ProtocolError::new(
                None,
                format!("invalid recording {}: {}", path.display(), e),
            )
        })?;

        debug!(
            path = %path.display(),
            responses = recording.responses.len(),
            "Loaded recording"
        );

        Ok(Self {
            source: Some(path.to_path_buf()),
            recording,
        })
    }

    /// Load the recording a `file://` endpoint points at.
    pub async fn from_url(endpoint: &ApiUrl) -> Result<Self> {
        let path = endpoint.to_file_path().ok_or_else(|| InvalidInputError::Endpoint {
            value: endpoint.to_string(),
            reason: "not a file:// URL".to_string(),
        })?;
        Self::open(path).await
    }

    /// The file the recording was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }
}

#[async_trait]
impl QueryExecutor for FileExecutor {
    #[instrument(skip(self, _document), fields(organization = %variables.orgname))]
    async fn execute(
        &self,
        _document: &str,
        variables: &QueryVariables,
    ) -> Result<OrganizationPayload> {
        let exchange = self.recording.find(variables).ok_or_else(|| {
            ProtocolError::new(
                None,
                format!(
                    "no recorded response for endCursor={:?} innerCursor={:?}",
                    variables.end_cursor, variables.inner_cursor
                ),
            )
        })?;

        debug!(
            end_cursor = ?variables.end_cursor,
            inner_cursor = ?variables.inner_cursor,
            "Replaying recorded response"
        );

        let response = &exchange.response;
        if !response.errors.is_empty() {
            return Err(GraphQlErrors(response.errors.clone()).into());
        }

        response
            .data
            .clone()
            .ok_or_else(|| ProtocolError::new(None, "response has no data").into())
    }
}
