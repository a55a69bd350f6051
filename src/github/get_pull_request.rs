//! GitHub Pull Request retrieval operation.

use crate::github::client::ApiContext;
use crate::github::error::GitHubError;
use crate::github::models::{PullRequest, PullRequestId};
use crate::github::transport::Headers;
use crate::github::util::{decode, segment, spawn_task};
use crate::runtime::AsyncTask;
use std::sync::Arc;

/// Get one pull request, including its `_links` and `head.sha`.
pub(crate) fn get_pull_request(
    inner: Arc<ApiContext>,
    id: PullRequestId,
) -> AsyncTask<Result<PullRequest, GitHubError>> {
    spawn_task(async move {
        let url = inner.endpoint(&format!(
            "/repos/{}/{}/pulls/{}",
            segment(&id.owner),
            segment(&id.repo),
            id.number
        ));
        let body = inner.get(&url, &Headers::new()).await?;
        decode(&url, body)
    })
}
