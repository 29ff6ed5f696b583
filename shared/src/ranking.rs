use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use super::*;

pub const XP_MULTIPLIER: u32 = 100;
pub const PODIUM_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub identity: GithubHandle,
    pub points: u32,
    pub rank: u32,
}

impl RankedEntry {
    pub const fn xp(&self) -> u32 {
        self.points * XP_MULTIPLIER
    }

    /// `1,100 XP`
    pub fn xp_display(&self) -> String {
        format!("{} XP", self.xp().to_formatted_string(&Locale::en))
    }
}

/// Every contributor, ranked by descending points. Equal points keep the
/// order in which the contributors first appeared.
pub fn ranking(scores: &ContributorScores) -> Vec<RankedEntry> {
    let mut entries: Vec<&ContributorScore> = scores.iter().collect();
    entries.sort_by(|a, b| b.points.cmp(&a.points));

    entries
        .into_iter()
        .zip(1..)
        .map(|(entry, rank)| RankedEntry {
            identity: entry.identity.clone(),
            points: entry.points,
            rank,
        })
        .collect()
}

pub fn top_n(scores: &ContributorScores, n: usize) -> Vec<RankedEntry> {
    let mut ranked = ranking(scores);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, u32)]) -> ContributorScores {
        let mut scores = ContributorScores::default();
        for (identity, points) in entries {
            scores.add(identity, *points);
        }
        scores
    }

    fn entry(identity: &str, points: u32, rank: u32) -> RankedEntry {
        RankedEntry {
            identity: identity.to_string(),
            points,
            rank,
        }
    }

    #[test]
    fn top_three() {
        let scores = scores(&[("a", 10), ("b", 30), ("c", 20), ("d", 5)]);

        assert_eq!(
            top_n(&scores, 3),
            vec![entry("b", 30, 1), entry("c", 20, 2), entry("a", 10, 3)]
        );
    }

    #[test]
    fn empty_scores_give_empty_podium() {
        assert!(top_n(&ContributorScores::default(), 3).is_empty());
    }

    #[test]
    fn fewer_contributors_than_requested() {
        let scores = scores(&[("a", 1), ("b", 2)]);
        let top = top_n(&scores, PODIUM_SIZE);

        assert_eq!(top, vec![entry("b", 2, 1), entry("a", 1, 2)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let scores = scores(&[("late", 5), ("early", 7), ("tie-1", 5), ("tie-2", 5)]);
        let ranked: Vec<_> = ranking(&scores)
            .into_iter()
            .map(|entry| entry.identity)
            .collect();

        assert_eq!(ranked, ["early", "late", "tie-1", "tie-2"]);
    }

    #[test]
    fn xp_is_formatted_with_separators() {
        assert_eq!(entry("a", 11, 1).xp(), 1100);
        assert_eq!(entry("a", 11, 1).xp_display(), "1,100 XP");
        assert_eq!(entry("a", 3, 1).xp_display(), "300 XP");
    }
}
