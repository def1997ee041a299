//! High score table
//!
//! Kept in memory for the life of the process, top 10 scores.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score, time bonus included
    pub score: u64,
    /// How the round ended
    pub outcome: Outcome,
    /// Seconds left on the clock when the round ended
    pub time_remaining: f32,
}

/// High score table, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the table
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished round.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(
        &mut self,
        score: u64,
        outcome: Outcome,
        time_remaining: f32,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let previous_best = self.best();
        let entry = HighScoreEntry {
            score,
            outcome,
            time_remaining,
        };

        // Ties keep the older entry ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);

        if previous_best.is_none_or(|best| score > best) {
            log::info!("New high score: {score}");
        }
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score recorded this session
    pub fn best(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, Outcome::TimeUp, 0.0), None);
        assert!(scores.is_empty());
        assert_eq!(scores.best(), None);
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(550, Outcome::CaughtInBlast, 120.0), Some(1));
        assert_eq!(scores.add_score(4100, Outcome::Victory, 90.5), Some(1));
        assert_eq!(scores.add_score(1000, Outcome::TimeUp, 0.0), Some(2));
        let ordered: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![4100, 1000, 550]);
        assert_eq!(scores.best(), Some(4100));
    }

    #[test]
    fn test_capped_at_max() {
        let mut scores = HighScores::new();
        for i in 1..=12u64 {
            scores.add_score(i * 100, Outcome::TimeUp, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(300));
        assert!(!scores.qualifies(300));
        assert!(scores.qualifies(301));
    }
}
