//! Scorers - evaluate listings against criteria along one dimension.
//!
//! Two scorer families run over the same batch of listing contents:
//! one judges the text summary, the other judges the scraped images.
//! Each listing costs exactly one request to the AI service, and a
//! failure for one listing never aborts the batch - the listing is
//! dropped from that scorer's map, mirroring the fan-out's fail-open
//! policy.

use tracing::{info, warn};

use crate::traits::ai::AI;
use crate::types::criteria::Criteria;
use crate::types::evaluation::{Evaluation, EvaluationMap, MIN_SCORE};
use crate::types::listing::ListingContent;

/// Outcome of one scorer family over a batch.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    /// Number of listings the scorer attempted
    pub attempted: usize,

    /// Evaluations keyed by listing URL
    pub evaluations: EvaluationMap,
}

impl ScoreReport {
    /// Number of listings that received an evaluation.
    pub fn succeeded(&self) -> usize {
        self.evaluations.len()
    }
}

/// Score every listing's description summary against the criteria.
pub async fn score_descriptions<A: AI>(
    ai: &A,
    criteria: &Criteria,
    contents: &[ListingContent],
) -> ScoreReport {
    let mut evaluations = EvaluationMap::new();

    for content in contents {
        match ai.score_description(criteria, &content.summary).await {
            Ok(review) => {
                evaluations.insert(
                    content.url.clone(),
                    Evaluation::new(&content.url, review.score, review.reasoning),
                );
            }
            Err(e) => {
                warn!(url = %content.url, error = %e, "description scoring failed; skipping");
            }
        }
    }

    info!(
        attempted = contents.len(),
        scored = evaluations.len(),
        "description scoring complete"
    );

    ScoreReport {
        attempted: contents.len(),
        evaluations,
    }
}

/// Score every listing's images against the criteria.
///
/// All of one listing's images go into a single multi-modal request.
/// A listing with zero images gets an explicit lowest score rather
/// than being silently omitted - the images told us nothing, which is
/// itself a (bad) answer.
pub async fn score_images<A: AI>(
    ai: &A,
    criteria: &Criteria,
    contents: &[ListingContent],
) -> ScoreReport {
    let mut evaluations = EvaluationMap::new();

    for content in contents {
        if content.image_urls.is_empty() {
            evaluations.insert(
                content.url.clone(),
                Evaluation::new(
                    &content.url,
                    MIN_SCORE,
                    "No images were available for this listing.",
                ),
            );
            continue;
        }

        match ai
            .score_images(criteria, &content.url, &content.image_urls)
            .await
        {
            Ok(review) => {
                evaluations.insert(
                    content.url.clone(),
                    Evaluation::new(&content.url, review.score, review.reasoning),
                );
            }
            Err(e) => {
                warn!(url = %content.url, error = %e, "image scoring failed; skipping");
            }
        }
    }

    info!(
        attempted = contents.len(),
        scored = evaluations.len(),
        "image scoring complete"
    );

    ScoreReport {
        attempted: contents.len(),
        evaluations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAI;
    use crate::traits::ai::ScoredReview;

    fn content(url: &str, images: usize) -> ListingContent {
        ListingContent::new(url, format!("summary of {}", url)).with_images(
            (0..images).map(|i| format!("{}/photo{}.jpg", url, i)),
        )
    }

    #[tokio::test]
    async fn scores_stay_in_range() {
        let ai = MockAI::new()
            .with_description_review("https://x/rooms/1", ScoredReview { score: 9, reasoning: "great".into() })
            .with_description_review("https://x/rooms/2", ScoredReview { score: 0, reasoning: "bad".into() });

        let report = score_descriptions(
            &ai,
            &Criteria::new("anything"),
            &[content("https://x/rooms/1", 1), content("https://x/rooms/2", 1)],
        )
        .await;

        for eval in report.evaluations.values() {
            assert!((1..=5).contains(&eval.score));
        }
    }

    #[tokio::test]
    async fn empty_batch_returns_empty_map() {
        let ai = MockAI::new();
        let criteria = Criteria::new("anything");

        let descriptions = score_descriptions(&ai, &criteria, &[]).await;
        let images = score_images(&ai, &criteria, &[]).await;

        assert!(descriptions.evaluations.is_empty());
        assert!(images.evaluations.is_empty());
        assert_eq!(descriptions.attempted, 0);
        assert_eq!(images.attempted, 0);
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let ai = MockAI::new().fail_description_scoring("https://x/rooms/2");
        let batch = [
            content("https://x/rooms/1", 1),
            content("https://x/rooms/2", 1),
            content("https://x/rooms/3", 1),
        ];

        let report = score_descriptions(&ai, &Criteria::new("anything"), &batch).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded(), 2);
        assert!(!report.evaluations.contains_key("https://x/rooms/2"));
    }

    #[tokio::test]
    async fn zero_images_defaults_to_lowest_score() {
        let ai = MockAI::new();
        let batch = [content("https://x/rooms/1", 0)];

        let report = score_images(&ai, &Criteria::new("anything"), &batch).await;

        let eval = &report.evaluations["https://x/rooms/1"];
        assert_eq!(eval.score, MIN_SCORE);
        assert!(eval.reasoning.contains("No images"));
        // The degenerate case never reaches the AI service
        assert!(ai.calls().is_empty());
    }

    #[tokio::test]
    async fn image_failure_isolated_per_listing() {
        let ai = MockAI::new().fail_image_scoring("https://x/rooms/1");
        let batch = [content("https://x/rooms/1", 2), content("https://x/rooms/2", 2)];

        let report = score_images(&ai, &Criteria::new("anything"), &batch).await;

        assert_eq!(report.succeeded(), 1);
        assert!(report.evaluations.contains_key("https://x/rooms/2"));
    }
}
