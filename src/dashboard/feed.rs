//! One-shot feed: load once and hand every published event to a sink.

use futures::StreamExt;
use log::{error, info};

use crate::dashboard::error::DashboardResult;
use crate::dashboard::events::{DashboardEvent, EventStream};
use crate::dashboard::orchestrator::{Dashboard, EnrichmentReport};

/// Load `dashboard` once, wait for its enrichment and deliver every event
/// from `events` to `sink`.
///
/// The sink has seen the whole stream by the time this returns, including
/// the `SET_ERROR` published when the load fails.
pub async fn run_once<F>(
    dashboard: Dashboard,
    mut events: EventStream,
    mut sink: F,
) -> DashboardResult<EnrichmentReport>
where
    F: FnMut(DashboardEvent) + Send + 'static,
{
    let printer = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            sink(event);
        }
    });

    let outcome = match dashboard.load().await {
        Ok(summary) => {
            info!(
                "{} pull requests from {} repositories, {} failed",
                summary.pull_requests,
                summary.repositories,
                summary.failed_repos.len()
            );
            let report = summary.enrichment.wait().await;
            info!(
                "Enrichment finished: {} applied, {} dropped",
                report.applied, report.dropped
            );
            Ok(report)
        }
        Err(e) => Err(e),
    };

    // Closing the last sender ends the event stream.
    drop(dashboard);
    if let Err(e) = printer.await {
        error!("Event sink stopped early: {e}");
    }
    outcome
}
