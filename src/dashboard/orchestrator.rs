//! Dashboard entry point: discovery, aggregation, enrichment, publishing.

use futures::future::join_all;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{RwLock, Semaphore};

use crate::config::DashboardConfig;
use crate::dashboard::aggregate::aggregate_pull_requests;
use crate::dashboard::discovery::{dedup, discover_repositories};
use crate::dashboard::enrichment::enrich_pull_request;
use crate::dashboard::error::{DashboardError, DashboardResult};
use crate::dashboard::events::{DashboardEvent, EventStream};
use crate::dashboard::ordering::PullRequestOrdering;
use crate::dashboard::store::{Generation, PullRequestStore};
use crate::github::models::{PullRequest, RepoRef};
use crate::github::{GitHubClient, HttpTransport, Transport};
use crate::runtime::{AsyncStream, AsyncTask};

/// Coordinates one dashboard's loads and owns its published state.
pub struct Dashboard {
    client: GitHubClient,
    users: Vec<String>,
    extra_repos: Vec<RepoRef>,
    ordering: PullRequestOrdering,
    store: Arc<RwLock<PullRequestStore>>,
    events: UnboundedSender<DashboardEvent>,
    enrichment_permits: Arc<Semaphore>,
}

/// Outcome of a load, returned as soon as the aggregate is published.
pub struct LoadSummary {
    pub generation: Generation,
    pub repositories: usize,
    pub pull_requests: usize,
    pub failed_repos: Vec<String>,
    /// Enrichment still in flight for this load.
    pub enrichment: EnrichmentHandle,
}

/// Handles to the enrichment units scheduled by one load.
pub struct EnrichmentHandle {
    tasks: Vec<AsyncTask<bool>>,
}

/// How many enrichment results reached the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub applied: usize,
    /// Superseded by a newer load before they finished.
    pub dropped: usize,
}

impl EnrichmentHandle {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for every scheduled enrichment to finish.
    pub async fn wait(self) -> EnrichmentReport {
        let mut report = EnrichmentReport::default();
        for applied in join_all(self.tasks).await {
            if matches!(applied, Ok(true)) {
                report.applied += 1;
            } else {
                report.dropped += 1;
            }
        }
        report
    }
}

impl Dashboard {
    /// Validate `config` and build a dashboard on the HTTP transport.
    pub fn new(config: &DashboardConfig) -> DashboardResult<(Self, EventStream)> {
        let transport = HttpTransport::new(config.token.clone(), config.request_timeout())
            .map_err(DashboardError::Client)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Validate `config` and build a dashboard on an arbitrary transport.
    pub fn with_transport(
        config: &DashboardConfig,
        transport: Arc<dyn Transport>,
    ) -> DashboardResult<(Self, EventStream)> {
        config.validate()?;
        let client = GitHubClient::builder()
            .base_uri(config.api_base_url.clone())
            .transport(transport)
            .comments(config.comments)
            .reactions(config.reactions)
            .build()
            .map_err(DashboardError::Client)?;

        let (events, stream) = AsyncStream::channel();
        let dashboard = Self {
            client,
            users: config.users.clone(),
            extra_repos: config.repo_refs()?,
            ordering: PullRequestOrdering::from_group_by_repo(config.group_by_repo),
            store: Arc::new(RwLock::new(PullRequestStore::new())),
            events,
            enrichment_permits: Arc::new(Semaphore::new(config.enrichment_concurrency)),
        };
        Ok((dashboard, stream))
    }

    #[must_use]
    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Load with the configured accounts.
    pub async fn load(&self) -> DashboardResult<LoadSummary> {
        self.load_accounts(None).await
    }

    /// Load with `accounts`, or the configured accounts when `None`.
    ///
    /// Publishes the sorted collection and failed repositories together, then
    /// schedules enrichment for every pull request without waiting for it.
    /// Only configuration and discovery failures are returned; they are also
    /// published as `SET_ERROR`.
    pub async fn load_accounts(&self, accounts: Option<&[String]>) -> DashboardResult<LoadSummary> {
        self.publish(DashboardEvent::StartLoading);

        let accounts = accounts.unwrap_or(self.users.as_slice());
        let discovered = match discover_repositories(&self.client, accounts).await {
            Ok(repos) => repos,
            Err(e) => {
                self.publish(DashboardEvent::SetError {
                    error: e.to_string(),
                });
                return Err(e);
            }
        };
        let repos = dedup(discovered.into_iter().chain(self.extra_repos.iter().cloned()));

        let aggregation = aggregate_pull_requests(&self.client, &repos, self.ordering).await;

        let generation = {
            let mut store = self.store.write().await;
            let generation = store.replace(
                aggregation.pull_requests.clone(),
                aggregation.failed_repos.clone(),
            );
            self.publish(DashboardEvent::AddPullRequests {
                pull_requests: aggregation.pull_requests.clone(),
            });
            self.publish(DashboardEvent::SetFailedRepos {
                failed_repos: aggregation.failed_repos.clone(),
            });
            generation
        };

        info!(
            "Load {generation}: {} pull requests published, scheduling enrichment",
            aggregation.pull_requests.len()
        );
        let enrichment = self.schedule_enrichment(generation, aggregation.pull_requests.iter());

        Ok(LoadSummary {
            generation,
            repositories: repos.len(),
            pull_requests: aggregation.pull_requests.len(),
            failed_repos: aggregation.failed_repos,
            enrichment,
        })
    }

    /// Discard everything published so far and load again from scratch.
    ///
    /// Enrichment still running for the previous load is dropped when it
    /// completes.
    pub async fn refresh(&self) -> DashboardResult<LoadSummary> {
        self.publish(DashboardEvent::Refresh);
        self.store.write().await.clear();
        self.load().await
    }

    /// Current collection and failed repositories.
    pub async fn snapshot(&self) -> (Vec<PullRequest>, Vec<String>) {
        let store = self.store.read().await;
        (store.pull_requests().to_vec(), store.failed_repos().to_vec())
    }

    fn schedule_enrichment<'a>(
        &self,
        generation: Generation,
        pull_requests: impl Iterator<Item = &'a PullRequest>,
    ) -> EnrichmentHandle {
        let tasks = pull_requests
            .map(|bare| {
                let bare = bare.clone();
                let client = self.client.clone();
                let store = self.store.clone();
                let events = self.events.clone();
                let permits = self.enrichment_permits.clone();

                AsyncTask::spawn_async(async move {
                    // The semaphore is never closed.
                    let _permit = permits.acquire_owned().await;
                    let enriched = enrich_pull_request(&client, &bare).await;

                    let mut store = store.write().await;
                    if store.update(generation, enriched.clone()) {
                        let _ = events.send(DashboardEvent::UpdatePullRequest {
                            pull_request: Box::new(enriched),
                        });
                        true
                    } else {
                        debug!("Dropping stale enrichment of {}", bare.id());
                        false
                    }
                })
            })
            .collect();
        EnrichmentHandle { tasks }
    }

    fn publish(&self, event: DashboardEvent) {
        debug!("Publishing {}", event.kind());
        // A dropped receiver just means nobody is watching.
        let _ = self.events.send(event);
    }
}
