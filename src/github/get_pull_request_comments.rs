//! GitHub Pull Request comments retrieval operation.

use crate::github::client::ApiContext;
use crate::github::error::GitHubError;
use crate::github::models::Comment;
use crate::github::transport::Headers;
use crate::github::util::{decode, spawn_task};
use crate::runtime::AsyncTask;
use std::sync::Arc;

/// Fetch the comments at `href`, the absolute link GitHub returns in a pull
/// request's `_links.comments`.
pub(crate) fn get_pull_request_comments(
    inner: Arc<ApiContext>,
    href: impl Into<String>,
) -> AsyncTask<Result<Vec<Comment>, GitHubError>> {
    let href = href.into();
    spawn_task(async move {
        if !inner.comments {
            return Ok(Vec::new());
        }
        let body = inner.get(&href, &Headers::new()).await?;
        decode(&href, body)
    })
}
