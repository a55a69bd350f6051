//! Pull request dashboard pipeline
//!
//! Discovery expands accounts into repositories, aggregation merges their
//! open pull requests, enrichment decorates each one independently, and the
//! [`Dashboard`] publishes every step as a [`DashboardEvent`].

pub mod aggregate;
pub mod discovery;
pub mod enrichment;
pub mod error;
pub mod events;
pub mod feed;
pub mod orchestrator;
pub mod ordering;
pub mod store;

pub use aggregate::{Aggregation, aggregate_pull_requests};
pub use discovery::discover_repositories;
pub use enrichment::enrich_pull_request;
pub use error::{DashboardError, DashboardResult};
pub use events::{DashboardEvent, EventStream};
pub use feed::run_once;
pub use orchestrator::{Dashboard, EnrichmentHandle, EnrichmentReport, LoadSummary};
pub use ordering::PullRequestOrdering;
pub use store::{Generation, PullRequestStore};
