//! Concurrent Evaluation Fan-out - render and summarize candidates.
//!
//! Each candidate is one independent unit of work: render the page,
//! then summarize its text through the completion service. Units share
//! no mutable state and may complete in any order; downstream stages
//! join on URL, never on position.

use std::time::Duration;

use futures::{stream, StreamExt};
use tracing::{info, warn};

use crate::error::{RenderError, SearchError};
use crate::traits::{ai::AI, renderer::Renderer};
use crate::types::listing::ListingContent;

/// Outcome of the fan-out stage.
///
/// Carries the attempted/succeeded split so silent per-unit loss is
/// observable by operators and tests.
#[derive(Debug, Clone)]
pub struct FanoutReport {
    /// Number of candidate units started
    pub attempted: usize,

    /// Successfully summarized listings (completion order, not input order)
    pub contents: Vec<ListingContent>,

    /// URLs whose unit failed (render, timeout, or summarization)
    pub failed: Vec<String>,
}

impl FanoutReport {
    /// Number of units that produced content.
    pub fn succeeded(&self) -> usize {
        self.contents.len()
    }
}

/// Render and summarize every candidate with bounded concurrency.
///
/// At most `max_workers` units run at once. A failure inside one unit
/// is caught at the unit boundary and drops only that candidate;
/// nothing is retried and no error escapes this function. Each unit
/// runs under `unit_timeout` since the collaborators impose no
/// timeout of their own.
pub async fn summarize_candidates<A, R>(
    ai: &A,
    renderer: &R,
    candidates: &[String],
    max_workers: usize,
    unit_timeout: Duration,
) -> FanoutReport
where
    A: AI,
    R: Renderer,
{
    let attempted = candidates.len();

    let results: Vec<(String, Result<ListingContent, SearchError>)> =
        stream::iter(candidates.iter().cloned())
            .map(|url| async move {
                let outcome = summarize_one(ai, renderer, &url, unit_timeout).await;
                (url, outcome)
            })
            .buffer_unordered(max_workers.max(1))
            .collect()
            .await;

    let mut report = FanoutReport {
        attempted,
        contents: Vec::with_capacity(attempted),
        failed: Vec::new(),
    };

    for (url, outcome) in results {
        match outcome {
            Ok(content) => report.contents.push(content),
            Err(e) => {
                warn!(url = %url, error = %e, "listing unit failed; skipping");
                report.failed.push(url);
            }
        }
    }

    info!(
        attempted = report.attempted,
        succeeded = report.succeeded(),
        failed = report.failed.len(),
        "fan-out complete"
    );

    report
}

/// One unit of work: render, then summarize.
async fn summarize_one<A: AI, R: Renderer>(
    ai: &A,
    renderer: &R,
    url: &str,
    unit_timeout: Duration,
) -> Result<ListingContent, SearchError> {
    let unit = async {
        let page = renderer.render(url).await?;
        let summary = ai.summarize_listing(url, &page.text).await?;
        Ok(ListingContent::new(url, summary).with_images(page.image_urls))
    };

    match tokio::time::timeout(unit_timeout, unit).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Render(RenderError::Timeout {
            url: url.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAI, MockAICall, MockRenderer};
    use crate::types::listing::RenderedPage;

    fn urls(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("https://www.airbnb.com/rooms/{}", i))
            .collect()
    }

    fn renderer_with_pages(urls: &[String]) -> MockRenderer {
        let mut renderer = MockRenderer::new();
        for url in urls {
            renderer = renderer.with_page(
                RenderedPage::new(url, format!("listing text for {}", url))
                    .with_images(vec![format!("{}/photo.jpg", url)]),
            );
        }
        renderer
    }

    #[tokio::test]
    async fn all_units_succeed() {
        let candidates = urls(4);
        let renderer = renderer_with_pages(&candidates);
        let ai = MockAI::new();

        let report = summarize_candidates(
            &ai,
            &renderer,
            &candidates,
            2,
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(report.attempted, 4);
        assert_eq!(report.succeeded(), 4);
        assert!(report.failed.is_empty());

        // Every content item carries its images through
        for content in &report.contents {
            assert_eq!(content.image_urls.len(), 1);
            assert!(!content.summary.is_empty());
        }
    }

    #[tokio::test]
    async fn failed_units_are_dropped_not_fatal() {
        let candidates = urls(5);
        let renderer = renderer_with_pages(&candidates)
            .fail_url(&candidates[1])
            .fail_url(&candidates[3]);
        let ai = MockAI::new();

        let report = summarize_candidates(
            &ai,
            &renderer,
            &candidates,
            4,
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(report.attempted, 5);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed.len(), 2);
        assert!(report.failed.contains(&candidates[1]));
        assert!(report.failed.contains(&candidates[3]));
    }

    #[tokio::test]
    async fn summarize_failure_drops_only_that_unit() {
        let candidates = urls(3);
        let renderer = renderer_with_pages(&candidates);
        let ai = MockAI::new().fail_summarize(&candidates[0]);

        let report = summarize_candidates(
            &ai,
            &renderer,
            &candidates,
            2,
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed, vec![candidates[0].clone()]);
    }

    #[tokio::test]
    async fn hung_render_times_out() {
        let candidates = urls(2);
        let renderer = renderer_with_pages(&candidates)
            .with_delay(&candidates[0], Duration::from_millis(200));
        let ai = MockAI::new();

        let report = summarize_candidates(
            &ai,
            &renderer,
            &candidates,
            2,
            Duration::from_millis(20),
        )
        .await;

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed, vec![candidates[0].clone()]);
    }

    #[tokio::test]
    async fn empty_candidate_set_is_a_no_op() {
        let renderer = MockRenderer::new();
        let ai = MockAI::new();

        let report =
            summarize_candidates(&ai, &renderer, &[], 4, Duration::from_secs(5)).await;

        assert_eq!(report.attempted, 0);
        assert_eq!(report.succeeded(), 0);
        assert!(ai
            .calls()
            .iter()
            .all(|c| !matches!(c, MockAICall::SummarizeListing { .. })));
    }
}
