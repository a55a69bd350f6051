//! GitHub API client wrapper
//!
//! Binds a [`Transport`] to an API base URL and exposes one method per
//! resource the dashboard reads. Every method spawns its request straight
//! away and hands back an [`AsyncTask`], so callers fan out simply by calling
//! several methods before awaiting any of them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use prdash::{GitHubClient, HttpTransport, RepoRef};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new(None, Duration::from_secs(30))?;
//!     let gh = GitHubClient::builder()
//!         .base_uri("https://api.github.com")
//!         .transport(Arc::new(transport))
//!         .build()?;
//!
//!     let repo: RepoRef = "rust-lang/rust".parse()?;
//!     let pulls = gh.list_pull_requests(&repo).await??;
//!     println!("{} open pull requests", pulls.len());
//!     Ok(())
//! }
//! ```

use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::{CommitStatus, Comment, PullRequest, PullRequestId, Reaction, RepoRef};
use crate::github::transport::{Headers, Transport};
use crate::runtime::AsyncTask;
use std::fmt;
use std::sync::Arc;

/// Shared state behind every [`GitHubClient`] clone.
pub(crate) struct ApiContext {
    pub(crate) transport: Arc<dyn Transport>,
    base_url: String,
    pub(crate) comments: bool,
    pub(crate) reactions: bool,
}

impl ApiContext {
    /// Absolute URL for an API path starting with `/`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    pub(crate) async fn get(&self, url: &str, headers: &Headers) -> GitHubResult<serde_json::Value> {
        self.transport.get(url, headers).await
    }
}

/// GitHub API client.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<ApiContext>,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.inner.base_url)
            .field("comments", &self.inner.comments)
            .field("reactions", &self.inner.reactions)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    #[must_use]
    pub fn comments_enabled(&self) -> bool {
        self.inner.comments
    }

    #[must_use]
    pub fn reactions_enabled(&self) -> bool {
        self.inner.reactions
    }

    // ========================================================================
    // Repositories
    // ========================================================================

    /// List the repositories owned by an account (first page only)
    pub fn list_repositories(
        &self,
        account: impl Into<String>,
    ) -> AsyncTask<GitHubResult<Vec<RepoRef>>> {
        crate::github::list_repositories::list_repositories(self.inner.clone(), account)
    }

    // ========================================================================
    // Pull Requests
    // ========================================================================

    /// List open pull requests for a repository (first page only)
    pub fn list_pull_requests(&self, repo: &RepoRef) -> AsyncTask<GitHubResult<Vec<PullRequest>>> {
        crate::github::list_pull_requests::list_pull_requests(self.inner.clone(), repo.clone())
    }

    /// Get a single pull request
    pub fn get_pull_request(&self, id: &PullRequestId) -> AsyncTask<GitHubResult<PullRequest>> {
        crate::github::get_pull_request::get_pull_request(self.inner.clone(), id.clone())
    }

    /// Get the comments behind a pull request's comments link.
    ///
    /// Resolves to an empty list without a request when comments are disabled.
    pub fn get_pull_request_comments(
        &self,
        href: impl Into<String>,
    ) -> AsyncTask<GitHubResult<Vec<Comment>>> {
        crate::github::get_pull_request_comments::get_pull_request_comments(
            self.inner.clone(),
            href,
        )
    }

    /// Get the reactions on a pull request.
    ///
    /// Resolves to an empty list without a request when reactions are disabled.
    pub fn get_pull_request_reactions(
        &self,
        id: &PullRequestId,
    ) -> AsyncTask<GitHubResult<Vec<Reaction>>> {
        crate::github::get_pull_request_reactions::get_pull_request_reactions(
            self.inner.clone(),
            id.clone(),
        )
    }

    // ========================================================================
    // Commits
    // ========================================================================

    /// Get the combined status of a commit
    pub fn get_commit_status(
        &self,
        repo: &RepoRef,
        sha: impl Into<String>,
    ) -> AsyncTask<GitHubResult<CommitStatus>> {
        crate::github::get_commit_status::get_commit_status(self.inner.clone(), repo.clone(), sha)
    }
}

/// Builder for [`GitHubClient`].
pub struct GitHubClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    base_uri: Option<String>,
    comments: bool,
    reactions: bool,
}

impl GitHubClientBuilder {
    /// Create a new builder. Comments start disabled, reactions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: None,
            base_uri: None,
            comments: false,
            reactions: true,
        }
    }

    /// Set the transport that performs requests
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set base URI (api.github.com or a GitHub Enterprise API root)
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Fetch pull request comments during enrichment
    #[must_use]
    pub fn comments(mut self, enabled: bool) -> Self {
        self.comments = enabled;
        self
    }

    /// Fetch pull request reactions during enrichment
    #[must_use]
    pub fn reactions(mut self, enabled: bool) -> Self {
        self.reactions = enabled;
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let transport = self
            .transport
            .ok_or_else(|| GitHubError::ClientSetup("no transport configured".to_string()))?;

        let base_url = self
            .base_uri
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| GitHubError::ClientSetup("no API base URL configured".to_string()))?;
        reqwest::Url::parse(&base_url)
            .map_err(|e| GitHubError::ClientSetup(format!("invalid base URL {base_url:?}: {e}")))?;

        Ok(GitHubClient {
            inner: Arc::new(ApiContext {
                transport,
                base_url,
                comments: self.comments,
                reactions: self.reactions,
            }),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
