//! Account repository listing operation.

use crate::github::client::ApiContext;
use crate::github::error::GitHubError;
use crate::github::models::{RepoRef, Repository};
use crate::github::transport::Headers;
use crate::github::util::{decode, segment, spawn_task};
use crate::runtime::AsyncTask;
use log::debug;
use std::sync::Arc;

/// List the repositories owned by `account`.
pub(crate) fn list_repositories(
    inner: Arc<ApiContext>,
    account: impl Into<String>,
) -> AsyncTask<Result<Vec<RepoRef>, GitHubError>> {
    let account = account.into();
    spawn_task(async move {
        if account.trim().is_empty() {
            return Err(GitHubError::InvalidInput(
                "account name must not be empty".to_string(),
            ));
        }

        let url = inner.endpoint(&format!("/users/{}/repos", segment(&account)));
        let body = inner.get(&url, &Headers::new()).await?;
        let repos: Vec<Repository> = decode(&url, body)?;

        debug!("{account}: {} repositories", repos.len());
        Ok(repos.iter().map(Repository::repo_ref).collect())
    })
}
