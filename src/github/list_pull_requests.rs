//! GitHub Pull Requests listing operation.

use crate::github::client::ApiContext;
use crate::github::error::GitHubError;
use crate::github::models::{PullRequest, RepoRef};
use crate::github::transport::Headers;
use crate::github::util::{decode, segment, spawn_task};
use crate::runtime::AsyncTask;
use std::sync::Arc;

/// List the open pull requests of one repository.
///
/// GitHub's default for this endpoint is `state=open`, first page.
pub(crate) fn list_pull_requests(
    inner: Arc<ApiContext>,
    repo: RepoRef,
) -> AsyncTask<Result<Vec<PullRequest>, GitHubError>> {
    spawn_task(async move {
        let url = inner.endpoint(&format!(
            "/repos/{}/{}/pulls",
            segment(&repo.owner),
            segment(&repo.name)
        ));
        let body = inner.get(&url, &Headers::new()).await?;
        decode(&url, body)
    })
}
