//! Pull request aggregation across repositories.
//!
//! Every call builds a fresh [`Aggregation`]; nothing is carried between
//! runs.

use futures::future::join_all;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashSet;

use crate::dashboard::ordering::PullRequestOrdering;
use crate::github::models::{PullRequest, RepoRef};
use crate::github::{GitHubClient, join_task};

/// Merged result of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub pull_requests: Vec<PullRequest>,
    /// `owner/name` of every repository whose listing failed, in input order.
    pub failed_repos: Vec<String>,
}

impl Aggregation {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed_repos.is_empty()
    }
}

/// Fetch open pull requests for every repository concurrently.
///
/// All requests are in flight before the first is awaited, and the call
/// resolves only once every one has finished. A failing repository is
/// recorded in `failed_repos` and otherwise ignored. An empty repository list
/// yields an empty aggregation.
pub async fn aggregate_pull_requests(
    client: &GitHubClient,
    repos: &[RepoRef],
    ordering: PullRequestOrdering,
) -> Aggregation {
    let tasks: Vec<_> = repos
        .iter()
        .map(|repo| (repo, client.list_pull_requests(repo)))
        .collect();

    let results = join_all(
        tasks
            .into_iter()
            .map(|(repo, task)| async move { (repo, join_task(task).await) }),
    )
    .await;

    let mut aggregation = Aggregation::default();
    let mut seen = HashSet::new();
    for (repo, result) in results {
        match result {
            Ok(pull_requests) => aggregation.pull_requests.extend(
                pull_requests
                    .into_iter()
                    .filter(|pr| seen.insert(pr.id())),
            ),
            Err(e) => {
                warn!("Failed to list pull requests for {repo}: {e}");
                aggregation.failed_repos.push(repo.to_string());
            }
        }
    }

    ordering.sort(&mut aggregation.pull_requests);

    info!(
        "Aggregated {} pull requests from {} repositories ({} failed)",
        aggregation.pull_requests.len(),
        repos.len(),
        aggregation.failed_repos.len()
    );
    aggregation
}
