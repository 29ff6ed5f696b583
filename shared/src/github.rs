use std::future::Future;

use octocrab::{models::pulls::PullRequest, Octocrab};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{Contributor, PullRequestRecord, RepoMetadata, SourceError};

pub const PULLS_PER_PAGE: u8 = 100;
pub const MAX_PULL_PAGES: u32 = 3;

impl From<PullRequest> for PullRequestRecord {
    fn from(pr: PullRequest) -> Self {
        Self {
            author: pr.user.map(|user| user.login).unwrap_or_default(),
            merged_at: pr.merged_at,
            labels: pr
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|label| label.name)
                .collect(),
        }
    }
}

/// Pull requests collected from the most recent pages.
#[derive(Debug, Default)]
pub struct PullHistory {
    pub records: Vec<PullRequestRecord>,
    /// Set to [`SourceError::PartialHistory`] when a page request failed.
    pub truncated: Option<SourceError>,
}

impl PullHistory {
    pub fn is_partial(&self) -> bool {
        self.truncated.is_some()
    }

    /// Appends one page. Returns `false` once there is nothing more to ask for.
    pub fn push_page(&mut self, page: Vec<PullRequestRecord>) -> bool {
        let full = page.len() >= PULLS_PER_PAGE as usize;
        self.records.extend(page);
        full
    }

    pub fn interrupt(&mut self, page: u32, reason: impl ToString) {
        self.truncated = Some(SourceError::PartialHistory {
            page,
            reason: reason.to_string(),
        });
    }
}

/// Requests pages `1..=MAX_PULL_PAGES` in order until a short or failed page.
pub async fn walk_pages<F, Fut>(mut fetch_page: F) -> PullHistory
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<PullRequestRecord>>>,
{
    let mut history = PullHistory::default();
    for page in 1..=MAX_PULL_PAGES {
        match fetch_page(page).await {
            Ok(records) => {
                debug!("Fetched {} pull requests from page {page}", records.len());
                if !history.push_page(records) {
                    break;
                }
            }
            Err(e) => {
                warn!("Failed to fetch pull requests page {page}: {e:#}");
                history.interrupt(page, e);
                break;
            }
        }
    }
    history
}

#[derive(Serialize)]
struct ContributorsParams {
    per_page: u8,
}

#[derive(Clone)]
pub struct GithubClient {
    octocrab: Octocrab,
}

impl GithubClient {
    /// Anonymous access works for public repositories, within a lower rate limit.
    pub fn new(github_token: Option<String>) -> anyhow::Result<Self> {
        let builder = Octocrab::builder();
        let octocrab = match github_token {
            Some(token) => builder.personal_token(token).build()?,
            None => builder.build()?,
        };
        Ok(Self { octocrab })
    }

    async fn pull_page(&self, owner: &str, repo: &str, page: u32) -> anyhow::Result<Vec<PullRequestRecord>> {
        let page = self
            .octocrab
            .pulls(owner, repo)
            .list()
            .state(octocrab::params::State::All)
            .per_page(PULLS_PER_PAGE)
            .page(page)
            .send()
            .await?;
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    /// Up to [`MAX_PULL_PAGES`] pages of pull requests. A failed page ends the
    /// walk with whatever was collected so far.
    #[instrument(skip(self))]
    pub async fn pull_history(&self, owner: &str, repo: &str) -> PullHistory {
        walk_pages(move |page| self.pull_page(owner, repo, page)).await
    }

    #[instrument(skip(self))]
    pub async fn repo_metadata(&self, owner: &str, repo: &str) -> anyhow::Result<RepoMetadata> {
        let repo = self.octocrab.repos(owner, repo).get().await?;
        Ok(RepoMetadata {
            full_name: repo.full_name.unwrap_or(repo.name),
            stars: repo.stargazers_count.unwrap_or_default(),
            forks: repo.forks_count.unwrap_or_default(),
            open_issues: repo.open_issues_count.unwrap_or_default(),
            watchers: repo.watchers_count.unwrap_or_default(),
            primary_language: repo
                .language
                .and_then(|l| l.as_str().map(ToString::to_string)),
        })
    }

    #[instrument(skip(self))]
    pub async fn contributors(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<Contributor>> {
        let contributors = self
            .octocrab
            .get(
                format!("/repos/{owner}/{repo}/contributors"),
                Some(&ContributorsParams {
                    per_page: PULLS_PER_PAGE,
                }),
            )
            .await?;
        Ok(contributors)
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use super::*;

    fn records(count: usize) -> Vec<PullRequestRecord> {
        (0..count)
            .map(|i| PullRequestRecord::new(format!("user-{i}"), None, Vec::<String>::new()))
            .collect()
    }

    #[test]
    fn short_page_ends_history() {
        let mut history = PullHistory::default();

        assert!(history.push_page(records(100)));
        assert!(!history.push_page(records(42)));
        assert_eq!(history.records.len(), 142);
        assert!(!history.is_partial());
    }

    #[test]
    fn empty_page_ends_history() {
        let mut history = PullHistory::default();

        assert!(!history.push_page(Vec::new()));
        assert!(history.records.is_empty());
    }

    #[test]
    fn interrupted_history_keeps_records() {
        let mut history = PullHistory::default();
        history.push_page(records(100));
        history.interrupt(2, "API rate limit exceeded");

        assert!(history.is_partial());
        assert_eq!(history.records.len(), 100);
        assert!(matches!(
            history.truncated,
            Some(SourceError::PartialHistory { page: 2, .. })
        ));
    }

    #[tokio::test]
    async fn walk_stops_after_last_page() {
        let mut requested = Vec::new();
        let history = walk_pages(|page| {
            requested.push(page);
            ready(Ok::<_, anyhow::Error>(records(100)))
        })
        .await;

        assert_eq!(requested, [1, 2, 3]);
        assert_eq!(history.records.len(), 300);
        assert!(!history.is_partial());
    }

    #[tokio::test]
    async fn walk_stops_on_short_page() {
        let mut requested = Vec::new();
        let history = walk_pages(|page| {
            requested.push(page);
            ready(Ok::<_, anyhow::Error>(records(if page == 1 { 100 } else { 7 })))
        })
        .await;

        assert_eq!(requested, [1, 2]);
        assert_eq!(history.records.len(), 107);
    }

    #[tokio::test]
    async fn failed_page_keeps_earlier_pages() {
        let mut requested = Vec::new();
        let history = walk_pages(|page| {
            requested.push(page);
            ready(if page == 2 {
                Err(anyhow::anyhow!("API rate limit exceeded"))
            } else {
                Ok(records(100))
            })
        })
        .await;

        assert_eq!(requested, [1, 2]);
        assert_eq!(history.records.len(), 100);
        match history.truncated {
            Some(SourceError::PartialHistory { page, reason }) => {
                assert_eq!(page, 2);
                assert!(reason.contains("rate limit"));
            }
            other => panic!("unexpected truncation: {other:?}"),
        }
    }
}
