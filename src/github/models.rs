//! Wire models for repositories, pull requests and their enrichment payloads.
//!
//! Pull requests keep every upstream field the display layer might want;
//! only the fields the pipeline reads are typed.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::github::error::GitHubError;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]+$").expect("static regex");
}

/// Whether `value` is a usable account or repository name.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

/// `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Build a reference, validating both parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, GitHubError> {
        let (owner, name) = (owner.into(), name.into());
        if !is_valid_name(&owner) || !is_valid_name(&name) {
            return Err(GitHubError::InvalidInput(format!(
                "invalid repository identifier {owner:?}/{name:?}"
            )));
        }
        Ok(Self { owner, name })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => Err(GitHubError::InvalidInput(format!(
                "expected owner/name, got {s:?}"
            ))),
        }
    }
}

/// Identity of a pull request across all aggregated repositories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PullRequestId {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Repository entry from an account listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

impl Repository {
    #[must_use]
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef {
            owner: self.owner.login.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRepository {
    pub name: String,
    pub owner: Owner,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub repo: BaseRepository,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Head {
    pub sha: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Issue comment on a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(pub Value);

/// Emoji reaction on a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reaction(pub Value);

impl Reaction {
    /// Reaction kind, e.g. `+1` or `heart`.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.0.get("content").and_then(Value::as_str)
    }
}

/// Combined commit status for a head commit.
///
/// `Default` is the explicit "no status known" value used when the lookup
/// fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CommitStatus {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub statuses: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An open pull request, bare as listed or enriched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub head: Head,
    pub base: Base,
    #[serde(rename = "_links", default)]
    pub links: Links,

    #[serde(rename = "computedComments", default, skip_serializing_if = "Option::is_none")]
    pub computed_comments: Option<Vec<Comment>>,
    #[serde(rename = "computedReactions", default, skip_serializing_if = "Option::is_none")]
    pub computed_reactions: Option<Vec<Reaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CommitStatus>,
    #[serde(rename = "enrichmentError", default, skip_serializing_if = "Option::is_none")]
    pub enrichment_error: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PullRequest {
    #[must_use]
    pub fn id(&self) -> PullRequestId {
        PullRequestId {
            owner: self.base.repo.owner.login.clone(),
            repo: self.base.repo.name.clone(),
            number: self.number,
        }
    }

    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.base.repo.name
    }

    #[must_use]
    pub fn comments_href(&self) -> Option<&str> {
        self.links.comments.as_ref().map(|link| link.href.as_str())
    }

    /// True once comments, reactions and status have all been set.
    #[must_use]
    pub fn is_enriched(&self) -> bool {
        self.computed_comments.is_some()
            && self.computed_reactions.is_some()
            && self.status.is_some()
    }
}
