//! AI trait for completion and structured-extraction operations.
//!
//! The pipeline needs five LLM capabilities:
//! - Criteria extraction (the one genuine NL-to-structure boundary)
//! - Listing summarization during the fan-out
//! - Description scoring and image scoring
//! - Justification synthesis for the final shortlist

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::criteria::Criteria;

/// A score plus its justification, as returned by one scorer request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoredReview {
    /// Match score from 1 (no match) to 5 (excellent match)
    pub score: u8,

    /// Brief justification for the score
    pub reasoning: String,
}

/// AI trait for LLM operations.
///
/// Implementations wrap a specific provider and own the prompting and
/// response parsing. Every method maps to exactly one request against
/// the underlying service.
#[async_trait]
pub trait AI: Send + Sync {
    /// Extract structured criteria from a free-text preference string.
    ///
    /// The returned criteria keeps the user's wording in
    /// `preferences` and fills whatever structured fields the text
    /// supports; unmentioned fields stay `None`.
    async fn extract_criteria(&self, preferences: &str) -> Result<Criteria>;

    /// Summarize one listing page into a single descriptive paragraph
    /// tuned for downstream matching against arbitrary criteria.
    async fn summarize_listing(&self, url: &str, page_text: &str) -> Result<String>;

    /// Score one listing's description against the criteria.
    async fn score_description(&self, criteria: &Criteria, summary: &str) -> Result<ScoredReview>;

    /// Score one listing's images against the criteria.
    ///
    /// All of the listing's images go into a single multi-modal
    /// request. Callers handle the zero-image case before calling;
    /// implementations may assume `image_urls` is non-empty.
    async fn score_images(
        &self,
        criteria: &Criteria,
        url: &str,
        image_urls: &[String],
    ) -> Result<ScoredReview>;

    /// Combine the two scorers' reasonings into one short
    /// justification paragraph for a shortlisted entry.
    async fn summarize_match(
        &self,
        criteria: &Criteria,
        description_reasoning: &str,
        image_reasoning: &str,
    ) -> Result<String>;

    /// Produce an example preference query (the `/generate_query`
    /// convenience endpoint).
    async fn example_query(&self) -> Result<String>;
}
