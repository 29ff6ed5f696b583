use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::*;

/// One historical pull request as seen by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GithubPullRequest")]
pub struct PullRequestRecord {
    pub author: GithubHandle,
    pub merged_at: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
}

impl PullRequestRecord {
    pub fn new(
        author: impl Into<GithubHandle>,
        merged_at: Option<DateTime<Utc>>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            author: author.into(),
            merged_at,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    pub fn is_authored_by(&self, handle: &str) -> bool {
        self.author.eq_ignore_ascii_case(handle)
    }
}

// Wire shape of `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Deserialize)]
struct GithubPullRequest {
    user: Option<GithubUser>,
    merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    labels: Vec<GithubLabel>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GithubLabel {
    name: String,
}

impl From<GithubPullRequest> for PullRequestRecord {
    fn from(pr: GithubPullRequest) -> Self {
        Self {
            author: pr.user.map(|user| user.login).unwrap_or_default(),
            merged_at: pr.merged_at,
            labels: pr.labels.into_iter().map(|label| label.name).collect(),
        }
    }
}
