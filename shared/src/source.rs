use std::{fmt, path::PathBuf, time::Duration};

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use strum::Display;
use tracing::{debug, info, instrument, warn};

use crate::{EventProposal, SourceError, SourceResult, SubmissionReceipt};

/// Marker left in endpoint settings that were never filled in.
pub const PLACEHOLDER_MARKER: &str = "YOUR_SCRIPT_URL";

// Plain text keeps Apps Script endpoints from requiring a CORS preflight.
pub const PROPOSAL_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Http(String),
    File(PathBuf),
}

impl Location {
    /// `None` for empty or placeholder endpoints.
    pub fn configured_endpoint(url: Option<&str>) -> Option<Self> {
        url.map(str::trim)
            .filter(|url| !url.is_empty() && !url.contains(PLACEHOLDER_MARKER))
            .map(|url| Location::Http(url.to_string()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Http(url) => write!(f, "{url}"),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Raw body stored at `location`. Non-success statuses are errors.
    async fn get(&self, location: &Location) -> SourceResult<Vec<u8>>;

    /// Posts `body` and reports the status the endpoint answered with.
    async fn post(&self, url: &str, content_type: &str, body: String) -> SourceResult<u16>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, location: &Location) -> SourceResult<Vec<u8>> {
        match location {
            Location::Http(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| SourceError::Transport(e.to_string()))?;
                if !response.status().is_success() {
                    return Err(SourceError::Status {
                        location: url.clone(),
                        status: response.status().as_u16(),
                    });
                }
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| SourceError::Transport(e.to_string()))?;
                Ok(body.to_vec())
            }
            Location::File(path) => tokio::fs::read(path).await.map_err(|source| SourceError::Io {
                location: path.display().to_string(),
                source,
            }),
        }
    }

    async fn post(&self, url: &str, content_type: &str, body: String) -> SourceResult<u16> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, serde::Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Origin {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub origin: Origin,
}

impl<T> Fetched<T> {
    pub fn is_remote(&self) -> bool {
        self.origin == Origin::Primary
    }
}

pub struct RecordSource<T: Transport = HttpTransport> {
    transport: T,
}

impl<T: Transport> RecordSource<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Reads a JSON array from `location`. Elements that don't fit `R` are
    /// skipped.
    #[instrument(skip(self, location), fields(location = %location))]
    pub async fn fetch_from<R: DeserializeOwned>(&self, location: &Location) -> SourceResult<Vec<R>> {
        let body = self.transport.get(location).await?;
        let values: Vec<serde_json::Value> = serde_json::from_slice(&body)
            .map_err(|e| SourceError::malformed(location.to_string(), e))?;

        let total = values.len();
        let records: Vec<R> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping record {index} from {location}: {e}");
                    None
                }
            })
            .collect();
        debug!("Loaded {} of {total} records", records.len());

        Ok(records)
    }

    /// Tries `primary` once, then `fallback` once.
    pub async fn fetch_records<R: DeserializeOwned>(
        &self,
        primary: Option<&Location>,
        fallback: &Location,
    ) -> SourceResult<Fetched<R>> {
        let primary_error = match primary {
            Some(location) => match self.fetch_from(location).await {
                Ok(records) => {
                    info!("Loaded records from {location}");
                    return Ok(Fetched {
                        records,
                        origin: Origin::Primary,
                    });
                }
                Err(e) => {
                    warn!("Primary source failed, switching to fallback: {e}");
                    e.to_string()
                }
            },
            None => {
                debug!("Primary source not configured, using fallback");
                SourceError::NotConfigured("primary source").to_string()
            }
        };

        match self.fetch_from(fallback).await {
            Ok(records) => {
                info!("Loaded records from fallback {fallback}");
                Ok(Fetched {
                    records,
                    origin: Origin::Fallback,
                })
            }
            Err(e) => Err(SourceError::SourceUnavailable {
                primary: primary_error,
                fallback: e.to_string(),
            }),
        }
    }

    /// Single best-effort POST of a proposal.
    #[instrument(skip(self, proposal), fields(title = %proposal.title))]
    pub async fn submit_proposal(
        &self,
        endpoint: Option<&Location>,
        proposal: &EventProposal,
    ) -> SourceResult<SubmissionReceipt> {
        let Some(Location::Http(url)) = endpoint else {
            return Err(SourceError::NotConfigured("proposal endpoint"));
        };
        let body = serde_json::to_string(proposal).map_err(|e| SourceError::malformed(url.clone(), e))?;
        let status = self.transport.post(url, PROPOSAL_CONTENT_TYPE, body).await?;
        let receipt = SubmissionReceipt::from_status(status);
        if !receipt.confirmed {
            warn!("Proposal delivered but not confirmed (status {status})");
        }
        Ok(receipt)
    }
}
