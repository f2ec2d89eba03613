//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the listing-search
//! library without making real AI or network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{RenderError, RenderResult, Result, SearchError};
use crate::traits::{
    ai::{ScoredReview, AI},
    renderer::Renderer,
};
use crate::types::{criteria::Criteria, listing::RenderedPage};

/// A mock AI implementation for testing.
///
/// Returns deterministic, configurable responses for all AI operations.
/// The two text scorers take a summary rather than a URL, so their
/// per-listing overrides are keyed by any substring of that summary;
/// in practice tests key them by the listing URL, which the default
/// summaries always contain.
#[derive(Default)]
pub struct MockAI {
    /// Predefined criteria extractions by preference text
    criteria: Arc<RwLock<HashMap<String, Criteria>>>,

    /// Predefined listing summaries by URL
    summaries: Arc<RwLock<HashMap<String, String>>>,

    /// Predefined description reviews, keyed by a summary substring
    description_reviews: Arc<RwLock<HashMap<String, ScoredReview>>>,

    /// Predefined image reviews by URL
    image_reviews: Arc<RwLock<HashMap<String, ScoredReview>>>,

    /// URLs whose summarization should fail
    fail_summaries: Arc<RwLock<Vec<String>>>,

    /// Summary substrings whose description scoring should fail
    fail_description: Arc<RwLock<Vec<String>>>,

    /// URLs whose image scoring should fail
    fail_images: Arc<RwLock<Vec<String>>>,

    /// Whether match justification should fail
    fail_match: Arc<RwLock<bool>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub enum MockAICall {
    ExtractCriteria { preferences: String },
    SummarizeListing { url: String },
    ScoreDescription { summary: String },
    ScoreImages { url: String, image_count: usize },
    SummarizeMatch,
    ExampleQuery,
}

impl MockAI {
    /// Create a new mock AI with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined criteria extraction for a preference string.
    pub fn with_extracted_criteria(self, preferences: impl Into<String>, criteria: Criteria) -> Self {
        self.criteria
            .write()
            .unwrap()
            .insert(preferences.into(), criteria);
        self
    }

    /// Add a predefined listing summary for a URL.
    pub fn with_summary(self, url: impl Into<String>, summary: impl Into<String>) -> Self {
        self.summaries
            .write()
            .unwrap()
            .insert(url.into(), summary.into());
        self
    }

    /// Add a predefined description review, keyed by a summary substring
    /// (typically the listing URL).
    pub fn with_description_review(self, key: impl Into<String>, review: ScoredReview) -> Self {
        self.description_reviews
            .write()
            .unwrap()
            .insert(key.into(), review);
        self
    }

    /// Add a predefined image review for a URL.
    pub fn with_image_review(self, url: impl Into<String>, review: ScoredReview) -> Self {
        self.image_reviews
            .write()
            .unwrap()
            .insert(url.into(), review);
        self
    }

    /// Make summarization fail for a URL.
    pub fn fail_summarize(self, url: impl Into<String>) -> Self {
        self.fail_summaries.write().unwrap().push(url.into());
        self
    }

    /// Make description scoring fail for summaries containing `key`.
    pub fn fail_description_scoring(self, key: impl Into<String>) -> Self {
        self.fail_description.write().unwrap().push(key.into());
        self
    }

    /// Make image scoring fail for a URL.
    pub fn fail_image_scoring(self, url: impl Into<String>) -> Self {
        self.fail_images.write().unwrap().push(url.into());
        self
    }

    /// Make every match justification fail.
    pub fn fail_match_summaries(self) -> Self {
        *self.fail_match.write().unwrap() = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn mock_failure(what: &str) -> SearchError {
        SearchError::ai(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("mock {} failure", what),
        ))
    }

    fn default_review() -> ScoredReview {
        ScoredReview {
            score: 3,
            reasoning: "Partially matches the stated criteria.".to_string(),
        }
    }
}

#[async_trait]
impl AI for MockAI {
    async fn extract_criteria(&self, preferences: &str) -> Result<Criteria> {
        self.calls.write().unwrap().push(MockAICall::ExtractCriteria {
            preferences: preferences.to_string(),
        });

        Ok(self
            .criteria
            .read()
            .unwrap()
            .get(preferences)
            .cloned()
            .unwrap_or_else(|| Criteria::new(preferences)))
    }

    async fn summarize_listing(&self, url: &str, _page_text: &str) -> Result<String> {
        self.calls
            .write()
            .unwrap()
            .push(MockAICall::SummarizeListing { url: url.to_string() });

        if self.fail_summaries.read().unwrap().contains(&url.to_string()) {
            return Err(Self::mock_failure("summarization"));
        }

        Ok(self
            .summaries
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| format!("Summary of listing at {}", url)))
    }

    async fn score_description(&self, _criteria: &Criteria, summary: &str) -> Result<ScoredReview> {
        self.calls.write().unwrap().push(MockAICall::ScoreDescription {
            summary: summary.to_string(),
        });

        if self
            .fail_description
            .read()
            .unwrap()
            .iter()
            .any(|key| summary.contains(key))
        {
            return Err(Self::mock_failure("description scoring"));
        }

        Ok(self
            .description_reviews
            .read()
            .unwrap()
            .iter()
            .find(|(key, _)| summary.contains(key.as_str()))
            .map(|(_, review)| review.clone())
            .unwrap_or_else(Self::default_review))
    }

    async fn score_images(
        &self,
        _criteria: &Criteria,
        url: &str,
        image_urls: &[String],
    ) -> Result<ScoredReview> {
        self.calls.write().unwrap().push(MockAICall::ScoreImages {
            url: url.to_string(),
            image_count: image_urls.len(),
        });

        if self.fail_images.read().unwrap().contains(&url.to_string()) {
            return Err(Self::mock_failure("image scoring"));
        }

        Ok(self
            .image_reviews
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(Self::default_review))
    }

    async fn summarize_match(
        &self,
        _criteria: &Criteria,
        description_reasoning: &str,
        image_reasoning: &str,
    ) -> Result<String> {
        self.calls.write().unwrap().push(MockAICall::SummarizeMatch);

        if *self.fail_match.read().unwrap() {
            return Err(Self::mock_failure("match justification"));
        }

        Ok(format!(
            "A strong fit: {} The photos agree: {}",
            description_reasoning, image_reasoning
        ))
    }

    async fn example_query(&self) -> Result<String> {
        self.calls.write().unwrap().push(MockAICall::ExampleQuery);

        Ok("A two-bedroom place in Austin with a pool and free parking, under $250 a night."
            .to_string())
    }
}

/// A mock page renderer for testing.
///
/// Returns predefined pages without making network requests.
#[derive(Default)]
pub struct MockRenderer {
    /// Predefined pages by URL
    pages: Arc<RwLock<HashMap<String, RenderedPage>>>,

    /// Fallback page served for any URL without an exact match.
    ///
    /// Search-result URLs carry long generated query strings, so tests
    /// register the start page here instead of spelling the URL out.
    start_page: Arc<RwLock<Option<RenderedPage>>>,

    /// URLs that should fail
    fail_urls: Arc<RwLock<Vec<String>>>,

    /// Artificial render latency by URL
    delays: Arc<RwLock<HashMap<String, Duration>>>,

    /// Call tracking
    calls: Arc<RwLock<Vec<MockRendererCall>>>,
}

/// Record of a call made to the mock renderer.
#[derive(Debug, Clone)]
pub enum MockRendererCall {
    Render { url: String },
}

impl MockRenderer {
    /// Create a new mock renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined page, keyed by its URL.
    pub fn with_page(self, page: RenderedPage) -> Self {
        self.pages.write().unwrap().insert(page.url.clone(), page);
        self
    }

    /// Set the fallback page for URLs with no exact match.
    pub fn with_start_page(self, page: RenderedPage) -> Self {
        *self.start_page.write().unwrap() = Some(page);
        self
    }

    /// Mark a URL as failing.
    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().push(url.into());
        self
    }

    /// Add artificial latency before a URL renders.
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockRendererCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn render(&self, url: &str) -> RenderResult<RenderedPage> {
        self.calls
            .write()
            .unwrap()
            .push(MockRendererCall::Render { url: url.to_string() });

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_urls.read().unwrap().iter().any(|f| url.starts_with(f)) {
            return Err(RenderError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Mock connection refused",
            ))));
        }

        if let Some(page) = self.pages.read().unwrap().get(url) {
            return Ok(page.clone());
        }

        if let Some(page) = self.start_page.read().unwrap().clone() {
            return Ok(page);
        }

        Err(RenderError::InvalidUrl { url: url.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_ai_returns_configured_summary() {
        let ai = MockAI::new().with_summary("https://example.com/rooms/1", "Cozy cabin");

        let summary = ai
            .summarize_listing("https://example.com/rooms/1", "page text")
            .await
            .unwrap();
        assert_eq!(summary, "Cozy cabin");

        let calls = ai.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], MockAICall::SummarizeListing { .. }));
    }

    #[tokio::test]
    async fn mock_ai_description_override_matches_on_substring() {
        let ai = MockAI::new().with_description_review(
            "https://example.com/rooms/1",
            ScoredReview { score: 5, reasoning: "Perfect".to_string() },
        );

        let review = ai
            .score_description(
                &Criteria::new("anything"),
                "Summary of listing at https://example.com/rooms/1",
            )
            .await
            .unwrap();
        assert_eq!(review.score, 5);
    }

    #[tokio::test]
    async fn mock_renderer_serves_exact_then_fallback() {
        let renderer = MockRenderer::new()
            .with_page(RenderedPage::new("https://a.example/rooms/1", "exact"))
            .with_start_page(RenderedPage::new("https://a.example/s/x/homes", "fallback"));

        let exact = renderer.render("https://a.example/rooms/1").await.unwrap();
        assert_eq!(exact.text, "exact");

        let fallback = renderer.render("https://a.example/s/x/homes?q=1").await.unwrap();
        assert_eq!(fallback.text, "fallback");
    }

    #[tokio::test]
    async fn mock_renderer_fail_url_wins_over_pages() {
        let renderer = MockRenderer::new()
            .with_page(RenderedPage::new("https://a.example/rooms/1", "content"))
            .fail_url("https://a.example/rooms/1");

        assert!(renderer.render("https://a.example/rooms/1").await.is_err());
    }
}
