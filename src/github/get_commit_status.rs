//! GitHub combined commit status retrieval operation.

use crate::github::client::ApiContext;
use crate::github::error::GitHubError;
use crate::github::models::{CommitStatus, RepoRef};
use crate::github::transport::Headers;
use crate::github::util::{decode, segment, spawn_task};
use crate::runtime::AsyncTask;
use std::sync::Arc;

/// Get the combined status for a commit SHA.
pub(crate) fn get_commit_status(
    inner: Arc<ApiContext>,
    repo: RepoRef,
    sha: impl Into<String>,
) -> AsyncTask<Result<CommitStatus, GitHubError>> {
    let sha = sha.into();
    spawn_task(async move {
        if sha.is_empty() {
            return Err(GitHubError::InvalidInput("commit sha must not be empty".to_string()));
        }
        let url = inner.endpoint(&format!(
            "/repos/{}/{}/commits/{}/status",
            segment(&repo.owner),
            segment(&repo.name),
            segment(&sha)
        ));
        let body = inner.get(&url, &Headers::new()).await?;
        decode(&url, body)
    })
}
