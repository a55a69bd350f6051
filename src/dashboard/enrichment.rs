//! Per pull request enrichment with comments, reactions and commit status.
//!
//! Enrichment never fails: each sub-fetch that errors falls back to its
//! empty value and the messages land in `enrichment_error`.

use log::{debug, warn};

use crate::github::models::{CommitStatus, PullRequest, RepoRef};
use crate::github::{GitHubClient, GitHubError, join_task};

/// Enrich one pull request.
///
/// The pull request is re-read first so status and comments follow the
/// current head SHA and comments link; if that read fails the `bare` record
/// supplies both. Comments, reactions and status are then fetched together
/// and merged only when all three have resolved. The result is `bare` with
/// only its enrichment fields set.
pub async fn enrich_pull_request(client: &GitHubClient, bare: &PullRequest) -> PullRequest {
    let id = bare.id();
    let mut errors = Vec::new();

    let detail = match join_task(client.get_pull_request(&id)).await {
        Ok(detail) if detail.id() == id => Some(detail),
        Ok(detail) => {
            errors.push(format!("detail lookup returned {}", detail.id()));
            None
        }
        Err(e) => {
            errors.push(format!("detail: {e}"));
            None
        }
    };
    let current = detail.as_ref().unwrap_or(bare);

    let repo = RepoRef {
        owner: id.owner.clone(),
        name: id.repo.clone(),
    };

    let comments = current
        .comments_href()
        .map(|href| client.get_pull_request_comments(href));
    let reactions = client.get_pull_request_reactions(&id);
    let status = client.get_commit_status(&repo, current.head.sha.clone());

    let (comments, reactions, status) = futures::join!(
        async {
            match comments {
                Some(task) => join_task(task).await,
                None => Ok(Vec::new()),
            }
        },
        join_task(reactions),
        join_task(status),
    );

    let mut pull_request = bare.clone();
    pull_request.computed_comments = Some(or_default(comments, "comments", &mut errors));
    pull_request.computed_reactions = Some(or_default(reactions, "reactions", &mut errors));
    pull_request.status = Some(or_default::<CommitStatus>(status, "status", &mut errors));

    if errors.is_empty() {
        pull_request.enrichment_error = None;
        debug!("Enriched {id}");
    } else {
        let message = errors.join("; ");
        warn!("Enrichment of {id} degraded: {message}");
        pull_request.enrichment_error = Some(message);
    }
    pull_request
}

fn or_default<T: Default>(
    result: Result<T, GitHubError>,
    what: &str,
    errors: &mut Vec<String>,
) -> T {
    result.unwrap_or_else(|e| {
        errors.push(format!("{what}: {e}"));
        T::default()
    })
}
