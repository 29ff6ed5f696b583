use anyhow::Context as _;
use shared::{
    github::{GithubClient, PullHistory},
    next_upcoming, prepare,
    source::{HttpTransport, Location, Origin, RecordSource},
    ContributorScores, EventProposal, EventRecord, Roadmaps, ScoringRules, SourceError,
    SourceResult, SubmissionReceipt,
};
use tracing::{instrument, warn};

use crate::config::Env;

/// Events after filtering and sorting, with where they came from.
#[derive(Debug, Clone)]
pub struct LoadedEvents {
    pub events: Vec<EventRecord>,
    pub origin: Origin,
}

impl LoadedEvents {
    pub fn next_upcoming(&self, now: chrono::DateTime<chrono::Utc>) -> Option<&EventRecord> {
        next_upcoming(&self.events, now).map(|index| &self.events[index])
    }
}

#[derive(Debug)]
pub struct LoadedScores {
    pub scores: ContributorScores,
    pub truncated: Option<SourceError>,
}

impl LoadedScores {
    /// A partial history still yields scores, unless not a single page came
    /// through.
    pub fn from_history(history: PullHistory, rules: &ScoringRules) -> SourceResult<Self> {
        let PullHistory { records, truncated } = history;
        if records.is_empty() {
            if let Some(e) = truncated {
                return Err(e);
            }
        }
        if let Some(e) = &truncated {
            warn!("Scoring a partial pull request history: {e}");
        }

        Ok(Self {
            scores: rules.score(&records),
            truncated,
        })
    }
}

pub struct Context {
    pub env: Env,
    source: RecordSource,
    github: Option<GithubClient>,
}

impl Context {
    pub fn new(env: Env) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(env.request_timeout())
            .context("Failed to create HTTP transport")?;
        Ok(Self {
            env,
            source: RecordSource::new(transport),
            github: None,
        })
    }

    pub fn with_github(mut self, github: GithubClient) -> Self {
        self.github = Some(github);
        self
    }

    pub fn github(&self) -> Option<&GithubClient> {
        self.github.as_ref()
    }

    pub fn events_endpoint(&self) -> Option<Location> {
        Location::configured_endpoint(self.env.events_api_url.as_deref())
    }

    #[instrument(skip(self))]
    pub async fn load_events(&self) -> SourceResult<LoadedEvents> {
        let primary = self.events_endpoint();
        let fallback = Location::File(self.env.events_fallback_path.clone());
        let fetched = self
            .source
            .fetch_records::<EventRecord>(primary.as_ref(), &fallback)
            .await?;

        Ok(LoadedEvents {
            events: prepare(&fetched.records, fetched.is_remote()),
            origin: fetched.origin,
        })
    }

    pub async fn submit_proposal(&self, proposal: &EventProposal) -> SourceResult<SubmissionReceipt> {
        self.source
            .submit_proposal(self.events_endpoint().as_ref(), proposal)
            .await
    }

    #[instrument(skip(self))]
    pub async fn load_roadmaps(&self) -> anyhow::Result<Roadmaps> {
        let path = &self.env.roadmap_path;
        let body = rocket::tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_slice(&body).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Scores over the recent pull request history.
    #[instrument(skip(self, github))]
    pub async fn load_scores(&self, github: &GithubClient) -> SourceResult<LoadedScores> {
        let history = github
            .pull_history(&self.env.repo_owner, &self.env.repo_name)
            .await;
        LoadedScores::from_history(history, &ScoringRules::new(self.env.repo_owner.clone()))
    }
}
