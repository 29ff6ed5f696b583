use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use shared::{EVENTS_PER_PAGE, PODIUM_SIZE};

use crate::consts;

/// Settings read from the environment (and `.env`). Every key is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Env {
    /// Set to an empty string to serve events from the fallback file only.
    #[serde(default = "default_events_api_url")]
    pub events_api_url: Option<String>,
    #[serde(default = "default_events_fallback_path")]
    pub events_fallback_path: PathBuf,
    #[serde(default = "default_roadmap_path")]
    pub roadmap_path: PathBuf,
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,
    #[serde(default = "default_repo_name")]
    pub repo_name: String,
    #[serde(default)]
    pub github_token: Option<String>,
    #[serde(default = "default_events_per_page")]
    pub events_per_page: usize,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_in_seconds: u64,
}

impl Env {
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_in_seconds)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self {
            events_api_url: default_events_api_url(),
            events_fallback_path: default_events_fallback_path(),
            roadmap_path: default_roadmap_path(),
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            github_token: None,
            events_per_page: default_events_per_page(),
            leaderboard_size: default_leaderboard_size(),
            request_timeout_in_seconds: default_request_timeout(),
        }
    }
}

fn default_events_api_url() -> Option<String> {
    Some(consts::EVENTS_API_URL.to_string())
}

fn default_events_fallback_path() -> PathBuf {
    PathBuf::from(consts::EVENTS_FALLBACK_PATH)
}

fn default_roadmap_path() -> PathBuf {
    PathBuf::from(consts::ROADMAP_PATH)
}

fn default_repo_owner() -> String {
    consts::REPO_OWNER.to_string()
}

fn default_repo_name() -> String {
    consts::REPO_NAME.to_string()
}

const fn default_events_per_page() -> usize {
    EVENTS_PER_PAGE
}

const fn default_leaderboard_size() -> usize {
    PODIUM_SIZE
}

const fn default_request_timeout() -> u64 {
    consts::REQUEST_TIMEOUT_IN_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_unset() {
        let env: Env = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(env.events_api_url.as_deref(), Some(consts::EVENTS_API_URL));
        assert_eq!(env.events_fallback_path, PathBuf::from("data/events.json"));
        assert_eq!(env.repo_owner, "sayeeg-11");
        assert_eq!(env.events_per_page, 6);
        assert_eq!(env.leaderboard_size, 3);
        assert_eq!(env.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn overrides_from_environment() {
        let env: Env = envy::from_iter(vars(&[
            ("EVENTS_API_URL", ""),
            ("REPO_OWNER", "someone"),
            ("EVENTS_PER_PAGE", "4"),
            ("REQUEST_TIMEOUT_IN_SECONDS", "3"),
        ]))
        .unwrap();

        assert_eq!(env.events_api_url.as_deref(), Some(""));
        assert_eq!(env.repo_owner, "someone");
        assert_eq!(env.events_per_page, 4);
        assert_eq!(env.request_timeout(), Duration::from_secs(3));
    }
}
