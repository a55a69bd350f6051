//! GitHub API operations module
//!
//! Resource fetchers for the dashboard, built on a pluggable [`Transport`].

pub mod client;
pub mod error;
pub mod models;
pub mod transport;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};
pub use util::{join_task, spawn_task};

pub use models::{
    CommitStatus, Comment, PullRequest, PullRequestId, Reaction, RepoRef, Repository,
};
pub use transport::{Headers, HttpTransport, Transport};

pub use get_pull_request_reactions::REACTIONS_PREVIEW;

// GitHub API operations - Repositories (internal)
pub(crate) mod list_repositories;

// GitHub API operations - Pull Requests (internal)
pub(crate) mod get_pull_request;
pub(crate) mod get_pull_request_comments;
pub(crate) mod get_pull_request_reactions;
pub(crate) mod list_pull_requests;

// GitHub API operations - Commits (internal)
pub(crate) mod get_commit_status;
