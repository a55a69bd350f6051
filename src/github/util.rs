//! GitHub API utilities

use crate::github::error::{GitHubError, GitHubResult};
use crate::runtime::AsyncTask;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;

/// Spawn an async task for a GitHub API call.
///
/// The call starts running immediately; awaiting the returned handle only
/// collects the result.
#[inline]
pub fn spawn_task<T, F>(work: F) -> AsyncTask<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    AsyncTask::spawn_async(work)
}

/// Await a spawned API call, folding a lost task into [`GitHubError`].
pub async fn join_task<T>(task: AsyncTask<GitHubResult<T>>) -> GitHubResult<T>
where
    T: Send + 'static,
{
    task.await.map_err(|_| GitHubError::TaskAborted)?
}

/// Decode a JSON body fetched from `url`.
pub(crate) fn decode<T: DeserializeOwned>(url: &str, body: Value) -> GitHubResult<T> {
    serde_json::from_value(body).map_err(|e| GitHubError::decode(url, &e))
}

/// Percent-encode one URL path segment.
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
