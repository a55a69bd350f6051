//! GitHub Pull Request reactions retrieval operation.

use crate::github::client::ApiContext;
use crate::github::error::GitHubError;
use crate::github::models::{PullRequestId, Reaction};
use crate::github::transport::Headers;
use crate::github::util::{decode, segment, spawn_task};
use crate::runtime::AsyncTask;
use std::sync::Arc;

/// Preview media type the reactions endpoint was introduced under.
pub const REACTIONS_PREVIEW: &str = "application/vnd.github.squirrel-girl-preview";

/// Fetch the reactions on a pull request (reactions live on the issue).
pub(crate) fn get_pull_request_reactions(
    inner: Arc<ApiContext>,
    id: PullRequestId,
) -> AsyncTask<Result<Vec<Reaction>, GitHubError>> {
    spawn_task(async move {
        if !inner.reactions {
            return Ok(Vec::new());
        }
        let url = inner.endpoint(&format!(
            "/repos/{}/{}/issues/{}/reactions",
            segment(&id.owner),
            segment(&id.repo),
            id.number
        ));
        let headers = Headers::from([("Accept".to_string(), REACTIONS_PREVIEW.to_string())]);
        let body = inner.get(&url, &headers).await?;
        decode(&url, body)
    })
}
