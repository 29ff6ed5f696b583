use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use super::*;

/// Difficulty class carried by a pull request label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Tier {
    Level3,
    Level2,
    Level1,
}

impl Tier {
    const fn markers(&self) -> [&'static str; 2] {
        match self {
            Tier::Level3 => ["level 3", "level-3"],
            Tier::Level2 => ["level 2", "level-2"],
            Tier::Level1 => ["level 1", "level-1"],
        }
    }

    /// Highest tier whose marker appears in the label. A label counts for
    /// one tier at most.
    pub fn matching(label: &str) -> Option<Tier> {
        let label = label.to_lowercase();
        Tier::iter().find(|tier| tier.markers().iter().any(|m| label.contains(m)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    pub level3: u32,
    pub level2: u32,
    pub level1: u32,
    pub default: u32,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            level3: 11,
            level2: 5,
            level1: 2,
            default: 1,
        }
    }
}

impl TierWeights {
    pub const fn weight(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Level3 => self.level3,
            Tier::Level2 => self.level2,
            Tier::Level1 => self.level1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorScore {
    pub identity: GithubHandle,
    pub points: u32,
}

/// Identity to points, iterated in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributorScores {
    entries: Vec<ContributorScore>,
    index: HashMap<GithubHandle, usize>,
}

impl ContributorScores {
    pub fn add(&mut self, identity: &str, points: u32) {
        let position = self.index.get(identity).copied();
        match position {
            Some(position) => self.entries[position].points += points,
            None => {
                self.index.insert(identity.to_string(), self.entries.len());
                self.entries.push(ContributorScore {
                    identity: identity.to_string(),
                    points,
                });
            }
        }
    }

    pub fn get(&self, identity: &str) -> Option<u32> {
        self.index
            .get(identity)
            .map(|&position| self.entries[position].points)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.index.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContributorScore> {
        self.entries.iter()
    }

    pub fn total_points(&self) -> u32 {
        self.entries.iter().map(|entry| entry.points).sum()
    }
}

impl<'a> IntoIterator for &'a ContributorScores {
    type Item = &'a ContributorScore;
    type IntoIter = std::slice::Iter<'a, ContributorScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub excluded_identity: GithubHandle,
    pub weights: TierWeights,
}

impl ScoringRules {
    pub fn new(excluded_identity: impl Into<GithubHandle>) -> Self {
        Self {
            excluded_identity: excluded_identity.into(),
            weights: TierWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: TierWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Points a single record is worth, ignoring merge state and author.
    pub fn record_points(&self, record: &PullRequestRecord) -> u32 {
        let tiered: Vec<u32> = record
            .labels
            .iter()
            .filter_map(|label| Tier::matching(label))
            .map(|tier| self.weights.weight(tier))
            .collect();

        if tiered.is_empty() {
            self.weights.default
        } else {
            tiered.into_iter().sum()
        }
    }

    fn counts(&self, record: &PullRequestRecord) -> bool {
        record.is_merged()
            && !record.author.is_empty()
            && !record.is_authored_by(&self.excluded_identity)
    }

    pub fn score<'a>(
        &self,
        records: impl IntoIterator<Item = &'a PullRequestRecord>,
    ) -> ContributorScores {
        let mut scores = ContributorScores::default();
        for record in records.into_iter().filter(|record| self.counts(record)) {
            scores.add(&record.author, self.record_points(record));
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    const OWNER: &str = "sayeeg-11";

    fn merged(author: &str, labels: &[&str]) -> PullRequestRecord {
        PullRequestRecord::new(
            author,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            labels.iter().copied(),
        )
    }

    fn unmerged(author: &str, labels: &[&str]) -> PullRequestRecord {
        PullRequestRecord::new(author, None, labels.iter().copied())
    }

    #[test]
    fn tier_matching() {
        assert_eq!(Tier::matching("Level 3"), Some(Tier::Level3));
        assert_eq!(Tier::matching("gssoc:level-1"), Some(Tier::Level1));
        assert_eq!(Tier::matching("level 2 / LEVEL-3"), Some(Tier::Level3));
        assert_eq!(Tier::matching("documentation"), None);
    }

    #[test]
    fn label_with_two_markers_counts_once() {
        let rules = ScoringRules::new(OWNER);
        let scores = rules.score(&[
            merged("alice", &["gssoc level 2 / level 3"]),
            merged("bob", &["level-1, level-2"]),
        ]);

        assert_eq!(scores.get("alice"), Some(11));
        assert_eq!(scores.get("bob"), Some(5));
    }

    #[test]
    fn unlabeled_merge_is_worth_default() {
        let rules = ScoringRules::new(OWNER);
        let scores = rules.score(&[merged("alice", &[]), merged("bob", &["bug", "good first issue"])]);

        assert_eq!(scores.get("alice"), Some(1));
        assert_eq!(scores.get("bob"), Some(1));
    }

    #[test]
    fn tiers_accumulate() {
        let rules = ScoringRules::new(OWNER);
        let scores = rules.score(&[merged("alice", &["level 2", "Level-3"])]);

        assert_eq!(scores.get("alice"), Some(16));
    }

    #[test]
    fn points_accumulate_per_author() {
        let rules = ScoringRules::new(OWNER);
        let records = [
            merged("alice", &["level 1"]),
            merged("bob", &["level 3"]),
            merged("alice", &["Level 2"]),
            merged("alice", &[]),
        ];
        let scores = rules.score(&records);

        assert_eq!(scores.get("alice"), Some(2 + 5 + 1));
        assert_eq!(scores.get("bob"), Some(11));
        assert_eq!(scores.total_points(), 19);
    }

    #[test]
    fn unmerged_records_are_ignored() {
        let rules = ScoringRules::new(OWNER);
        let scores = rules.score(&[unmerged("alice", &["level 3"]), merged("bob", &[])]);

        assert!(!scores.contains("alice"));
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn owner_is_never_scored() {
        let rules = ScoringRules::new(OWNER);
        let records = [
            merged("sayeeg-11", &["level 3"]),
            merged("SAYEEG-11", &[]),
            merged("Sayeeg-11", &["level 1"]),
            merged("carol", &[]),
            merged("", &["level 3"]),
        ];
        let scores = rules.score(&records);

        assert!(scores
            .iter()
            .all(|entry| !entry.identity.eq_ignore_ascii_case(OWNER)));
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn first_appearance_order_is_kept() {
        let rules = ScoringRules::new(OWNER);
        let records = [merged("zed", &[]), merged("amy", &[]), merged("zed", &[])];
        let identities: Vec<_> = rules
            .score(&records)
            .iter()
            .map(|entry| entry.identity.clone())
            .collect();

        assert_eq!(identities, ["zed", "amy"]);
    }

    #[test]
    fn scoring_is_idempotent() {
        let rules = ScoringRules::new(OWNER);
        let records = [
            merged("alice", &["level 2"]),
            merged("bob", &["level-1", "level 3"]),
            unmerged("carol", &[]),
        ];

        assert_eq!(rules.score(&records), rules.score(&records));
    }

    #[test]
    fn custom_weights() {
        let weights = TierWeights {
            level3: 30,
            level2: 20,
            level1: 10,
            default: 0,
        };
        let rules = ScoringRules::new(OWNER).with_weights(weights);
        let scores = rules.score(&[merged("alice", &["level 1"]), merged("alice", &[])]);

        assert_eq!(scores.get("alice"), Some(10));
    }
}
