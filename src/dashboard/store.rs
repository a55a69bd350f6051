//! The published pull request collection.
//!
//! Aggregation replaces the whole collection and starts a new generation;
//! enrichment updates single records and is only accepted for the
//! generation it was scheduled in.

use std::collections::HashMap;

use crate::github::models::{PullRequest, PullRequestId};

/// Monotonic id of one full collection replace.
pub type Generation = u64;

#[derive(Debug, Default)]
pub struct PullRequestStore {
    generation: Generation,
    pull_requests: Vec<PullRequest>,
    index: HashMap<PullRequestId, usize>,
    failed_repos: Vec<String>,
}

impl PullRequestStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn pull_requests(&self) -> &[PullRequest] {
        &self.pull_requests
    }

    #[must_use]
    pub fn failed_repos(&self) -> &[String] {
        &self.failed_repos
    }

    #[must_use]
    pub fn get(&self, id: &PullRequestId) -> Option<&PullRequest> {
        self.index.get(id).map(|&i| &self.pull_requests[i])
    }

    /// Swap in a new collection, returning its generation.
    pub fn replace(
        &mut self,
        pull_requests: Vec<PullRequest>,
        failed_repos: Vec<String>,
    ) -> Generation {
        self.generation += 1;
        self.index = pull_requests
            .iter()
            .enumerate()
            .map(|(i, pr)| (pr.id(), i))
            .collect();
        self.pull_requests = pull_requests;
        self.failed_repos = failed_repos;
        self.generation
    }

    /// Drop everything and start a new, empty generation.
    pub fn clear(&mut self) -> Generation {
        self.replace(Vec::new(), Vec::new())
    }

    /// Overwrite the record with the same identity.
    ///
    /// Returns `false`, leaving the store untouched, when `generation` is
    /// stale or the identity is unknown.
    pub fn update(&mut self, generation: Generation, pull_request: PullRequest) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.index.get(&pull_request.id()) {
            Some(&i) => {
                self.pull_requests[i] = pull_request;
                true
            }
            None => false,
        }
    }
}
