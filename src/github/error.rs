//! GitHub API error types

use thiserror::Error;

/// Error types for GitHub API calls
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Upstream answered with a non-success status
    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The request never produced a response
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The request exceeded the configured timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The response body was not the expected shape
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// The spawned call was dropped before it produced a result
    #[error("Background request task ended without a result")]
    TaskAborted,
}

impl GitHubError {
    /// HTTP status code, when the failure came from an upstream response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn decode(url: impl Into<String>, source: &serde_json::Error) -> Self {
        GitHubError::Decode {
            url: url.into(),
            message: source.to_string(),
        }
    }
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;
