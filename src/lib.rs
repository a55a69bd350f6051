//! `prdash` - open pull request dashboard feed
//!
//! Discovers the repositories of a set of GitHub accounts, aggregates their
//! open pull requests, enriches each one with comments, reactions and commit
//! status, and publishes every state change as an event for a display layer.

// Module declarations
pub mod config;
pub mod dashboard;
pub mod github;
pub mod runtime;

// Re-export runtime types
pub use runtime::{AsyncStream, AsyncTask};

// Re-export configuration
pub use config::{ConfigError, DashboardConfig};

// Re-export GitHub client and transport types
pub use github::{
    CommitStatus, Comment, GitHubClient, GitHubClientBuilder, GitHubError, GitHubResult, Headers,
    HttpTransport, PullRequest, PullRequestId, REACTIONS_PREVIEW, Reaction, RepoRef, Transport,
};

// Re-export the pipeline
pub use dashboard::{
    Aggregation, Dashboard, DashboardError, DashboardEvent, DashboardResult, EnrichmentHandle,
    EnrichmentReport, EventStream, LoadSummary, PullRequestOrdering, aggregate_pull_requests,
    discover_repositories, enrich_pull_request, run_once,
};
