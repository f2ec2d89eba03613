//! Weighted Rank-Merge - join scoreboards, rank, truncate, justify.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::traits::ai::AI;
use crate::types::criteria::Criteria;
use crate::types::evaluation::{EvaluationMap, RankedEntry};

/// Outcome of the rank-merge stage.
#[derive(Debug, Clone)]
pub struct RankReport {
    /// Final ordered shortlist
    pub entries: Vec<RankedEntry>,

    /// Listings scored by only one family and dropped by the join.
    ///
    /// The join silently shrinks the shortlist; this count makes the
    /// loss visible to operators.
    pub join_gaps: usize,

    /// Joined entries dropped by the shown-count cap
    pub truncated: usize,

    /// Entries whose justification call failed and fell back to the
    /// scorers' raw reasonings
    pub summary_fallbacks: usize,
}

/// Join the two scoreboards, rank, truncate, and synthesize
/// justifications.
///
/// Only listings present in **both** maps survive the join. The
/// composite is `w_desc * description + (1 - w_desc) * image`.
/// Ordering is deterministic: composite descending, then original
/// candidate-set position ascending, then URL as a final fallback.
/// Justifications are one sequential completion call per surviving
/// entry; a failed call falls back to the scorers' own reasonings so
/// the stage stays fail-open.
pub async fn rank_and_summarize<A: AI>(
    ai: &A,
    criteria: &Criteria,
    candidates: &[String],
    descriptions: &EvaluationMap,
    images: &EvaluationMap,
    description_weight: f64,
    shown_listings: usize,
) -> RankReport {
    let image_weight = 1.0 - description_weight;

    // Inner join by URL. Both inputs are ordered maps, so the pre-sort
    // order is already deterministic.
    let mut joined: Vec<(&str, f64)> = descriptions
        .iter()
        .filter(|(url, _)| images.contains_key(*url))
        .map(|(url, desc)| {
            let img = &images[url];
            let composite =
                description_weight * f64::from(desc.score) + image_weight * f64::from(img.score);
            (url.as_str(), composite)
        })
        .collect();

    let union_size = descriptions
        .keys()
        .chain(images.keys())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    let join_gaps = union_size - joined.len();
    if join_gaps > 0 {
        warn!(join_gaps, "listings dropped by the scoreboard join");
    }

    // Tie-break on the order the candidate set was discovered in.
    let positions: HashMap<&str, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, url)| (url.as_str(), i))
        .collect();
    let position = |url: &str| positions.get(url).copied().unwrap_or(usize::MAX);

    joined.sort_by(|(a_url, a_score), (b_url, b_score)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| position(a_url).cmp(&position(b_url)))
            .then_with(|| a_url.cmp(b_url))
    });

    let truncated = joined.len().saturating_sub(shown_listings);
    joined.truncate(shown_listings);

    let mut entries = Vec::with_capacity(joined.len());
    let mut summary_fallbacks = 0;

    for (url, composite_score) in joined {
        let desc = &descriptions[url];
        let img = &images[url];

        let summary = match ai
            .summarize_match(criteria, &desc.reasoning, &img.reasoning)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!(url = %url, error = %e, "justification call failed; using raw reasonings");
                summary_fallbacks += 1;
                format!("{} {}", desc.reasoning, img.reasoning)
            }
        };

        entries.push(RankedEntry {
            url: url.to_string(),
            composite_score,
            summary,
        });
    }

    info!(
        shortlisted = entries.len(),
        join_gaps,
        truncated,
        "rank-merge complete"
    );

    RankReport {
        entries,
        join_gaps,
        truncated,
        summary_fallbacks,
    }
}
