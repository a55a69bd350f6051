//! Errors that abort a dashboard load.
//!
//! Per-repository and per-pull-request failures never appear here: they are
//! absorbed into the failed-repo list and `enrichmentError` respectively.

use thiserror::Error;

use crate::config::ConfigError;
use crate::github::GitHubError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to list repositories for {account}: {source}")]
    Discovery {
        account: String,
        #[source]
        source: GitHubError,
    },

    #[error("Failed to create GitHub client: {0}")]
    Client(#[source] GitHubError),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
