//! The Pipeline - main entry point for the listing-search library.
//!
//! Drives the stages strictly sequentially: candidate discovery →
//! evaluation fan-out → the two scorers → weighted rank-merge. Only
//! the fan-out parallelizes internally; no stage starts before its
//! predecessor's result is fully written. Stage inputs and outputs are
//! typed records passed by reference - nothing is recovered by
//! re-parsing a shared transcript - while each stage's result is also
//! written once to the stage result store so a batch can be retrieved
//! out of process.

use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::Result;
use crate::pipeline::{
    candidates::discover_candidates,
    fanout::summarize_candidates,
    rank::rank_and_summarize,
    scoring::{score_descriptions, score_images},
    start_url::search_url,
};
use crate::traits::{ai::AI, renderer::Renderer, store::ResultStore};
use crate::types::{
    config::SearchConfig,
    criteria::Criteria,
    evaluation::{FinalEntry, RankedEntry},
};

/// Stage result ids written during one run.
#[derive(Debug, Clone, Copy)]
pub struct StageIds {
    /// Serialized `Vec<ListingContent>` from the fan-out
    pub contents: Uuid,

    /// Description scorer's evaluation map
    pub description_scores: Uuid,

    /// Image scorer's evaluation map
    pub image_scores: Uuid,
}

/// Per-stage diagnostic counts for one run.
///
/// Per-item failures are recovered silently inside their stage, so
/// these counts are the only way operators can see the loss.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Candidate listings discovered (after dedupe and cap)
    pub candidates: usize,

    /// Fan-out units attempted / succeeded
    pub fanout_attempted: usize,
    pub fanout_succeeded: usize,

    /// Listings scored by each family
    pub description_scored: usize,
    pub image_scored: usize,

    /// Listings dropped by the inner join
    pub join_gaps: usize,

    /// Joined entries dropped by the shown-count cap
    pub truncated: usize,

    /// Shortlist justifications that fell back to raw reasonings
    pub summary_fallbacks: usize,
}

/// Result of one full pipeline run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Final ordered shortlist
    pub entries: Vec<RankedEntry>,

    /// Diagnostic counts
    pub report: SearchReport,

    /// Where each stage's batch was written
    pub stage_ids: StageIds,
}

/// The search pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::new(MemoryStore::new(), ai, renderer);
///
/// let criteria = pipeline.criteria_from_text("2BR in Austin under $200/night").await?;
/// let outcome = pipeline.run(&criteria, result_id).await?;
/// ```
pub struct Pipeline<S: ResultStore, A: AI, R: Renderer> {
    store: S,
    ai: A,
    renderer: R,
    config: SearchConfig,
}

impl<S: ResultStore, A: AI, R: Renderer> Pipeline<S, A, R> {
    /// Create a pipeline with the default configuration.
    pub fn new(store: S, ai: A, renderer: R) -> Self {
        Self {
            store,
            ai,
            renderer,
            config: SearchConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(store: S, ai: A, renderer: R, config: SearchConfig) -> Self {
        Self {
            store,
            ai,
            renderer,
            config,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Get a reference to the stage result store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Extract structured criteria from a free-text preference string.
    ///
    /// The one place natural language is turned into structure; every
    /// later stage receives the typed [`Criteria`] directly.
    pub async fn criteria_from_text(&self, preferences: &str) -> Result<Criteria> {
        let mut criteria = self.ai.extract_criteria(preferences).await?;
        if criteria.preferences.trim().is_empty() {
            criteria.preferences = preferences.to_string();
        }
        Ok(criteria)
    }

    /// Run the full pipeline and persist the final shortlist under
    /// `final_result_id`.
    #[instrument(skip(self, criteria), fields(location = criteria.location.as_deref().unwrap_or("")))]
    pub async fn run(&self, criteria: &Criteria, final_result_id: Uuid) -> Result<SearchOutcome> {
        // 1. Candidate discovery. A failed or empty search page is not
        //    fatal; it flows through as an empty shortlist.
        let start_url = search_url(criteria)?;
        let candidates = self
            .discover(&start_url)
            .await;

        // 2. Evaluation fan-out.
        let fanout = summarize_candidates(
            &self.ai,
            &self.renderer,
            &candidates,
            self.config.max_workers,
            self.config.unit_timeout,
        )
        .await;
        let contents_id = self.store.put(&serde_json::to_value(&fanout.contents)?).await?;

        // 3. Scorers, one family at a time over the same batch.
        let description_report =
            score_descriptions(&self.ai, criteria, &fanout.contents).await;
        let description_scores_id = self
            .store
            .put(&serde_json::to_value(&description_report.evaluations)?)
            .await?;

        let image_report = score_images(&self.ai, criteria, &fanout.contents).await;
        let image_scores_id = self
            .store
            .put(&serde_json::to_value(&image_report.evaluations)?)
            .await?;

        // 4. Rank-merge and justification.
        let rank_report = rank_and_summarize(
            &self.ai,
            criteria,
            &candidates,
            &description_report.evaluations,
            &image_report.evaluations,
            self.config.description_weight,
            self.config.shown_listings,
        )
        .await;

        // 5. Persist the final ordered list under the caller's id so a
        //    separate reader can retrieve it.
        let final_entries: Vec<FinalEntry> =
            rank_report.entries.iter().map(FinalEntry::from).collect();
        self.store
            .put_with_id(final_result_id, &json!(final_entries))
            .await?;

        let report = SearchReport {
            candidates: candidates.len(),
            fanout_attempted: fanout.attempted,
            fanout_succeeded: fanout.succeeded(),
            description_scored: description_report.succeeded(),
            image_scored: image_report.succeeded(),
            join_gaps: rank_report.join_gaps,
            truncated: rank_report.truncated,
            summary_fallbacks: rank_report.summary_fallbacks,
        };

        info!(
            candidates = report.candidates,
            shortlisted = rank_report.entries.len(),
            join_gaps = report.join_gaps,
            "pipeline run complete"
        );

        Ok(SearchOutcome {
            entries: rank_report.entries,
            report,
            stage_ids: StageIds {
                contents: contents_id,
                description_scores: description_scores_id,
                image_scores: image_scores_id,
            },
        })
    }

    /// Read a persisted shortlist back by its final result id.
    ///
    /// Fails with [`crate::error::SearchError::MissingStageResult`]
    /// when the id does not resolve.
    pub async fn final_result(&self, final_result_id: Uuid) -> Result<Vec<FinalEntry>> {
        let value = self.store.get_required(final_result_id).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Produce an example preference query.
    pub async fn example_query(&self) -> Result<String> {
        self.ai.example_query().await
    }

    async fn discover(&self, start_url: &str) -> Vec<String> {
        discover_candidates(&self.renderer, start_url, self.config.max_listings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::stores::MemoryStore;
    use crate::testing::{MockAI, MockRenderer};
    use crate::types::listing::RenderedPage;

    #[tokio::test]
    async fn empty_candidate_set_persists_empty_shortlist() {
        // Search page renders fine but has no listing links.
        let start_page =
            RenderedPage::new("https://www.airbnb.com/s/Nowhere/homes", "no results")
                .with_links(vec!["https://www.airbnb.com/help"]);
        let renderer = MockRenderer::new().with_start_page(start_page);
        let pipeline = Pipeline::new(MemoryStore::new(), MockAI::new(), renderer);

        let final_id = Uuid::new_v4();
        let criteria = Criteria::new("anything").with_location("Nowhere");
        let outcome = pipeline.run(&criteria, final_id).await.unwrap();

        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.report.candidates, 0);
        assert_eq!(pipeline.final_result(final_id).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn missing_final_result_id_is_fatal() {
        let pipeline = Pipeline::new(MemoryStore::new(), MockAI::new(), MockRenderer::new());

        let err = pipeline.final_result(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SearchError::MissingStageResult { .. }));
    }

    #[tokio::test]
    async fn criteria_from_text_keeps_raw_preferences_when_extraction_drops_them() {
        let pipeline = Pipeline::new(
            MemoryStore::new(),
            MockAI::new()
                .with_extracted_criteria("2BR in Austin under $200/night", Criteria::default()),
            MockRenderer::new(),
        );

        let criteria = pipeline
            .criteria_from_text("2BR in Austin under $200/night")
            .await
            .unwrap();
        assert_eq!(criteria.preferences, "2BR in Austin under $200/night");
    }
}
