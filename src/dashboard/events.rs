//! Events published to the state container that backs the display.

use serde::Serialize;

use crate::github::models::PullRequest;
use crate::runtime::AsyncStream;

/// One state change, in the order the store applied it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardEvent {
    StartLoading,
    Refresh,
    /// Replaces the whole collection.
    AddPullRequests {
        #[serde(rename = "pullRequests")]
        pull_requests: Vec<PullRequest>,
    },
    SetFailedRepos {
        #[serde(rename = "failedRepos")]
        failed_repos: Vec<String>,
    },
    /// Replaces one record, matched by identity.
    UpdatePullRequest {
        #[serde(rename = "pullRequest")]
        pull_request: Box<PullRequest>,
    },
    SetError { error: String },
}

impl DashboardEvent {
    /// The `type` tag as published.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StartLoading => "START_LOADING",
            Self::Refresh => "REFRESH",
            Self::AddPullRequests { .. } => "ADD_PULL_REQUESTS",
            Self::SetFailedRepos { .. } => "SET_FAILED_REPOS",
            Self::UpdatePullRequest { .. } => "UPDATE_PULL_REQUEST",
            Self::SetError { .. } => "SET_ERROR",
        }
    }
}

/// Stream of every event a [`Dashboard`](crate::Dashboard) publishes.
pub type EventStream = AsyncStream<DashboardEvent>;
