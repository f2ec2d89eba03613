//! End-to-end pipeline tests over mock collaborators.

use listing_search::testing::{MockAI, MockRenderer};
use listing_search::{
    Criteria, EvaluationMap, FinalEntry, ListingContent, MemoryStore, Pipeline, RenderedPage,
    ResultStore, ScoredReview, SearchConfig,
};
use uuid::Uuid;

const U1: &str = "https://www.airbnb.com/rooms/101";
const U2: &str = "https://www.airbnb.com/rooms/202";

fn results_page() -> RenderedPage {
    RenderedPage::new(
        "https://www.airbnb.com/s/Austin/homes",
        "Search results for Austin",
    )
    .with_links(vec![U1, U2, "https://www.airbnb.com/help"])
}

fn listing_page(url: &str) -> RenderedPage {
    RenderedPage::new(url, format!("A lovely two-bedroom place at {}", url))
        .with_images(vec![format!("{}/photo1.jpg", url)])
}

/// One candidate survives the fan-out, gets scored 5 on its description
/// and 4 on its images, and comes out as the single shortlist entry with
/// composite 0.8 * 5 + 0.2 * 4 = 4.8.
#[tokio::test]
async fn partial_failure_run_produces_weighted_shortlist() {
    let renderer = MockRenderer::new()
        .with_start_page(results_page())
        .with_page(listing_page(U1))
        .fail_url(U2);

    let ai = MockAI::new()
        .with_description_review(
            U1,
            ScoredReview {
                score: 5,
                reasoning: "Matches every stated preference.".to_string(),
            },
        )
        .with_image_review(
            U1,
            ScoredReview {
                score: 4,
                reasoning: "Photos show the pool and a clean interior.".to_string(),
            },
        );

    let pipeline = Pipeline::new(MemoryStore::new(), ai, renderer);
    let criteria = Criteria::new("2BR in Austin with a pool").with_location("Austin");

    let final_id = Uuid::new_v4();
    let outcome = pipeline.run(&criteria, final_id).await.unwrap();

    // u2's failure cost exactly one unit, nothing else
    assert_eq!(outcome.report.candidates, 2);
    assert_eq!(outcome.report.fanout_attempted, 2);
    assert_eq!(outcome.report.fanout_succeeded, 1);
    assert_eq!(outcome.report.description_scored, 1);
    assert_eq!(outcome.report.image_scored, 1);
    assert_eq!(outcome.report.join_gaps, 0);

    assert_eq!(outcome.entries.len(), 1);
    let entry = &outcome.entries[0];
    assert_eq!(entry.url, U1);
    assert!((entry.composite_score - 4.8).abs() < 1e-9);
    assert!(!entry.summary.is_empty());

    // The persisted shortlist matches what the run returned
    let persisted = pipeline.final_result(final_id).await.unwrap();
    assert_eq!(
        persisted,
        vec![FinalEntry {
            url: entry.url.clone(),
            summary: entry.summary.clone(),
        }]
    );
}

#[tokio::test]
async fn stage_results_are_retrievable_by_id() {
    let renderer = MockRenderer::new()
        .with_start_page(results_page())
        .with_page(listing_page(U1))
        .with_page(listing_page(U2));

    let pipeline = Pipeline::new(MemoryStore::new(), MockAI::new(), renderer);
    let criteria = Criteria::new("anything").with_location("Austin");

    let outcome = pipeline.run(&criteria, Uuid::new_v4()).await.unwrap();
    let ids = outcome.stage_ids;

    let contents: Vec<ListingContent> = serde_json::from_value(
        pipeline.store().get_required(ids.contents).await.unwrap(),
    )
    .unwrap();
    assert_eq!(contents.len(), 2);

    let descriptions: EvaluationMap = serde_json::from_value(
        pipeline
            .store()
            .get_required(ids.description_scores)
            .await
            .unwrap(),
    )
    .unwrap();
    let images: EvaluationMap = serde_json::from_value(
        pipeline
            .store()
            .get_required(ids.image_scores)
            .await
            .unwrap(),
    )
    .unwrap();

    assert!(descriptions.contains_key(U1) && descriptions.contains_key(U2));
    assert!(images.contains_key(U1) && images.contains_key(U2));
}

/// The shown-listings cap applies to the joined, ranked list.
#[tokio::test]
async fn shortlist_respects_shown_listings_cap() {
    let urls: Vec<String> = (0..6)
        .map(|i| format!("https://www.airbnb.com/rooms/{}", 300 + i))
        .collect();

    let mut renderer = MockRenderer::new().with_start_page(
        RenderedPage::new("https://www.airbnb.com/s/Austin/homes", "results")
            .with_links(urls.clone()),
    );
    for url in &urls {
        renderer = renderer.with_page(listing_page(url));
    }

    let config = SearchConfig::default().with_shown_listings(3);
    let pipeline = Pipeline::with_config(MemoryStore::new(), MockAI::new(), renderer, config);
    let criteria = Criteria::new("anything").with_location("Austin");

    let outcome = pipeline.run(&criteria, Uuid::new_v4()).await.unwrap();

    assert_eq!(outcome.report.candidates, 6);
    assert_eq!(outcome.entries.len(), 3);
    assert_eq!(outcome.report.truncated, 3);
}

#[tokio::test]
async fn criteria_without_location_is_rejected_before_any_network_work() {
    let renderer = MockRenderer::new();
    let pipeline = Pipeline::new(MemoryStore::new(), MockAI::new(), renderer);

    let err = pipeline
        .run(&Criteria::new("somewhere nice"), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        listing_search::SearchError::InvalidCriteria { .. }
    ));
}
