//! Dashboard configuration.
//!
//! Loaded from a TOML file and validated once at startup; nothing downstream
//! re-checks identifiers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::github::models::{RepoRef, is_valid_name};

/// Environment variable consulted when the file carries no token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Fatal configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("api_base_url is missing")]
    MissingBaseUrl,

    #[error("api_base_url {url:?} is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid account name {0:?}")]
    InvalidAccount(String),

    #[error("Invalid repository identifier {0:?}, expected owner/name")]
    InvalidRepo(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Everything the pipeline reads from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Accounts whose repositories are discovered
    #[serde(default)]
    pub users: Vec<String>,
    /// Extra `owner/name` repositories aggregated alongside discovered ones
    #[serde(default)]
    pub repos: Vec<String>,
    #[serde(default)]
    pub comments: bool,
    #[serde(default = "default_true")]
    pub reactions: bool,
    #[serde(default)]
    pub group_by_repo: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_enrichment_concurrency() -> usize {
    8
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token: None,
            users: Vec::new(),
            repos: Vec::new(),
            comments: false,
            reactions: true,
            group_by_repo: false,
            request_timeout_secs: default_request_timeout_secs(),
            enrichment_concurrency: default_enrichment_concurrency(),
        }
    }
}

impl DashboardConfig {
    /// Parse TOML text. Does not validate.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read, parse and validate a config file, falling back to
    /// `GITHUB_TOKEN` when the file has no token.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text)?;
        if config.token.is_none() {
            config.token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        reqwest::Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;

        if let Some(bad) = self.users.iter().find(|user| !is_valid_name(user)) {
            return Err(ConfigError::InvalidAccount(bad.clone()));
        }
        self.repo_refs()?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero {
                field: "request_timeout_secs",
            });
        }
        if self.enrichment_concurrency == 0 {
            return Err(ConfigError::Zero {
                field: "enrichment_concurrency",
            });
        }
        Ok(())
    }

    /// Explicitly configured repositories, parsed.
    pub fn repo_refs(&self) -> Result<Vec<RepoRef>, ConfigError> {
        self.repos
            .iter()
            .map(|repo| {
                repo.parse::<RepoRef>()
                    .map_err(|_| ConfigError::InvalidRepo(repo.clone()))
            })
            .collect()
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
