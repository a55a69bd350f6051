//! Repository discovery: account names to a flat, de-duplicated repo list.

use futures::future::try_join_all;
use log::{error, info};
use std::collections::HashSet;

use crate::config::ConfigError;
use crate::dashboard::error::{DashboardError, DashboardResult};
use crate::github::models::{RepoRef, is_valid_name};
use crate::github::{GitHubClient, join_task};

/// List every repository of every account, one request per account.
///
/// All listings are issued before any is awaited. The first failure aborts
/// discovery; no partial account results are returned. Order follows the
/// account order, then the upstream listing order, keeping the first
/// occurrence of any repository.
pub async fn discover_repositories(
    client: &GitHubClient,
    accounts: &[String],
) -> DashboardResult<Vec<RepoRef>> {
    if let Some(bad) = accounts.iter().find(|account| !is_valid_name(account)) {
        return Err(ConfigError::InvalidAccount(bad.clone()).into());
    }

    let listings = accounts.iter().map(|account| {
        let task = client.list_repositories(account.as_str());
        async move {
            join_task(task).await.map_err(|source| {
                error!("Repository discovery failed for {account}: {source}");
                DashboardError::Discovery {
                    account: account.clone(),
                    source,
                }
            })
        }
    });
    let per_account = try_join_all(listings).await?;

    let repos = dedup(per_account.into_iter().flatten());
    info!("Discovered {} repositories across {} accounts", repos.len(), accounts.len());
    Ok(repos)
}

/// Keep the first occurrence of each repository, preserving order.
pub(crate) fn dedup(repos: impl IntoIterator<Item = RepoRef>) -> Vec<RepoRef> {
    let mut seen = HashSet::new();
    repos
        .into_iter()
        .filter(|repo| seen.insert(repo.clone()))
        .collect()
}
