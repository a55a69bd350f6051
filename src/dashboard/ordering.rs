//! Total orderings over aggregated pull requests.

use std::cmp::Ordering;

use crate::github::models::PullRequest;

/// How the merged pull request list is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestOrdering {
    /// Most recently updated first.
    #[default]
    Recency,
    /// Repository name ascending, then most recently updated first.
    GroupedByRepository,
}

impl PullRequestOrdering {
    #[must_use]
    pub fn from_group_by_repo(group_by_repo: bool) -> Self {
        if group_by_repo {
            Self::GroupedByRepository
        } else {
            Self::Recency
        }
    }

    #[must_use]
    pub fn compare(self, a: &PullRequest, b: &PullRequest) -> Ordering {
        match self {
            Self::Recency => by_recency(a, b),
            Self::GroupedByRepository => a
                .repo_name()
                .cmp(b.repo_name())
                .then_with(|| by_recency(a, b)),
        }
    }

    /// Stable sort; equal keys keep their merge order.
    pub fn sort(self, pull_requests: &mut [PullRequest]) {
        pull_requests.sort_by(|a, b| self.compare(a, b));
    }
}

fn by_recency(a: &PullRequest, b: &PullRequest) -> Ordering {
    b.updated_at.cmp(&a.updated_at)
}
