use serde::{Deserialize, Serialize};
use strum::Display;

use super::*;

pub const XP_PER_LEVEL: u32 = 500;
pub const ELITE_XP_THRESHOLD: u32 = 1000;

/// Entry of the repository contributors listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: GithubHandle,
    #[serde(default, rename = "avatar_url")]
    pub avatar: String,
    pub contributions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ContributorStatus {
    Elite,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorProfile {
    pub rank: u32,
    pub login: GithubHandle,
    pub avatar: String,
    pub contributions: u32,
    pub xp: u32,
    pub level: u32,
    pub status: ContributorStatus,
}

impl ContributorProfile {
    pub fn new(rank: u32, contributor: Contributor) -> Self {
        let xp = contributor.contributions.saturating_mul(XP_MULTIPLIER);
        Self {
            rank,
            login: contributor.login,
            avatar: contributor.avatar,
            contributions: contributor.contributions,
            xp,
            level: xp / XP_PER_LEVEL + 1,
            status: if xp > ELITE_XP_THRESHOLD {
                ContributorStatus::Elite
            } else {
                ContributorStatus::Active
            },
        }
    }

    pub fn matches(&self, search: &str) -> bool {
        self.login.to_lowercase().contains(&search.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub total_agents: u32,
    pub total_merges: u32,
    pub global_xp: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub kpis: DashboardKpis,
    pub profiles: Vec<ContributorProfile>,
}

impl Dashboard {
    /// Contributors are expected in the order the API returns them (most
    /// contributions first); rank follows that order.
    pub fn new(contributors: Vec<Contributor>) -> Self {
        let profiles: Vec<ContributorProfile> = contributors
            .into_iter()
            .zip(1..)
            .map(|(contributor, rank)| ContributorProfile::new(rank, contributor))
            .collect();

        let kpis = DashboardKpis {
            total_agents: profiles.len() as u32,
            total_merges: profiles.iter().map(|p| p.contributions).sum(),
            global_xp: profiles.iter().map(|p| p.xp).sum(),
        };

        Self { kpis, profiles }
    }

    /// Keeps the profiles whose login contains `search`. KPIs stay global.
    pub fn search(mut self, search: &str) -> Self {
        let search = search.trim();
        if !search.is_empty() {
            self.profiles.retain(|profile| profile.matches(search));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(login: &str, contributions: u32) -> Contributor {
        Contributor {
            login: login.to_string(),
            avatar: format!("https://avatars.githubusercontent.com/{login}"),
            contributions,
        }
    }

    #[test]
    fn profile_levels() {
        let rookie = ContributorProfile::new(2, contributor("rookie", 3));
        assert_eq!(rookie.xp, 300);
        assert_eq!(rookie.level, 1);
        assert_eq!(rookie.status, ContributorStatus::Active);

        let veteran = ContributorProfile::new(1, contributor("veteran", 11));
        assert_eq!(veteran.xp, 1100);
        assert_eq!(veteran.level, 3);
        assert_eq!(veteran.status, ContributorStatus::Elite);

        let edge = ContributorProfile::new(3, contributor("edge", 10));
        assert_eq!(edge.status, ContributorStatus::Active);
        assert_eq!(edge.status.to_string(), "ACTIVE");
    }

    #[test]
    fn dashboard_kpis() {
        let dashboard = Dashboard::new(vec![
            contributor("veteran", 11),
            contributor("rookie", 3),
        ]);

        assert_eq!(
            dashboard.kpis,
            DashboardKpis {
                total_agents: 2,
                total_merges: 14,
                global_xp: 1400,
            }
        );
        assert_eq!(dashboard.profiles[1].rank, 2);
    }

    #[test]
    fn search_keeps_kpis() {
        let dashboard = Dashboard::new(vec![
            contributor("Veteran", 11),
            contributor("rookie", 3),
        ])
        .search(" VET ");

        assert_eq!(dashboard.profiles.len(), 1);
        assert_eq!(dashboard.profiles[0].login, "Veteran");
        assert_eq!(dashboard.kpis.total_agents, 2);
    }

    #[test]
    fn parses_contributors_listing() {
        let json = r#"[{"login": "alice", "avatar_url": "https://a", "contributions": 42, "type": "User"}]"#;
        let contributors: Vec<Contributor> = serde_json::from_str(json).unwrap();

        assert_eq!(contributors[0], Contributor {
            login: "alice".to_string(),
            avatar: "https://a".to_string(),
            contributions: 42,
        });
    }
}
