//! Scorer outputs and ranked entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lowest score a scorer can assign.
pub const MIN_SCORE: u8 = 1;

/// Highest score a scorer can assign.
pub const MAX_SCORE: u8 = 5;

/// One scorer family's verdict for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Listing URL this evaluation refers to
    pub url: String,

    /// Match score, always within [1, 5]
    pub score: u8,

    /// Short free-text justification from the scorer
    pub reasoning: String,
}

impl Evaluation {
    /// Create an evaluation, clamping the score into [1, 5].
    pub fn new(url: impl Into<String>, score: u8, reasoning: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            score: score.clamp(MIN_SCORE, MAX_SCORE),
            reasoning: reasoning.into(),
        }
    }
}

/// URL-keyed evaluations from one scorer family.
///
/// A `BTreeMap` so iteration order is deterministic; downstream joins
/// key on URL, never on position.
pub type EvaluationMap = BTreeMap<String, Evaluation>;

/// One entry of the final ranked shortlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Listing URL
    pub url: String,

    /// Weighted composite of the description and image scores
    pub composite_score: f64,

    /// Synthesized justification for the ranking
    pub summary: String,
}

/// The persisted shape of a shortlist entry.
///
/// The composite score is derived state and is not persisted; a later
/// reader gets the ordered {url, summary} pairs only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalEntry {
    /// Listing URL
    pub url: String,

    /// Justification summary
    pub summary: String,
}

impl From<&RankedEntry> for FinalEntry {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            url: entry.url.clone(),
            summary: entry.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_clamps_score_into_range() {
        assert_eq!(Evaluation::new("u", 0, "r").score, 1);
        assert_eq!(Evaluation::new("u", 9, "r").score, 5);
        assert_eq!(Evaluation::new("u", 3, "r").score, 3);
    }
}
