//! OpenAI implementation of the AI trait.
//!
//! Text operations run as plain chat completions; the two scorers use
//! structured outputs so the score/reasoning pair always parses. Image
//! scoring sends every listing photo in one multi-modal request.
//!
//! # Example
//!
//! ```rust,ignore
//! use listing_search::ai::OpenAiService;
//!
//! let ai = OpenAiService::from_env()?.with_model("gpt-4o-mini");
//! let pipeline = Pipeline::new(store, ai, renderer);
//! ```

use async_trait::async_trait;
use openai_client::{
    truncate_to_char_boundary, ChatRequest, Message, OpenAIClient, StructuredOutput,
    StructuredRequest,
};

use crate::error::{Result, SearchError};
use crate::pipeline::prompts::{
    format_extract_criteria_prompt, format_score_description_prompt, format_score_images_prompt,
    format_summarize_match_prompt, EXAMPLE_QUERY_PROMPT, SUMMARIZE_LISTING_PROMPT,
};
use crate::traits::ai::{ScoredReview, AI};
use crate::types::criteria::Criteria;

/// Largest page-text slice sent to the summarizer.
const MAX_PAGE_TEXT_BYTES: usize = 48_000;

/// OpenAI-based AI implementation.
#[derive(Clone)]
pub struct OpenAiService {
    client: OpenAIClient,
    model: String,
    temperature: f32,
}

impl OpenAiService {
    /// Create a service over an existing client.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.9,
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let client = OpenAIClient::from_env()
            .map_err(|e| SearchError::Config(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature (default: 0.9).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system))
            .message(Message::user(user))
            .temperature(self.temperature);

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(SearchError::ai)?;

        Ok(response.content)
    }

    async fn structured_review(&self, messages: Vec<Message>) -> Result<ScoredReview> {
        let request =
            StructuredRequest::from_messages(&self.model, messages, ScoredReview::openai_schema())
                .temperature(self.temperature);

        let json_str = self
            .client
            .structured_output(request)
            .await
            .map_err(SearchError::ai)?;

        Ok(serde_json::from_str(&json_str)?)
    }
}

#[async_trait]
impl AI for OpenAiService {
    async fn extract_criteria(&self, preferences: &str) -> Result<Criteria> {
        let request = StructuredRequest::new(
            &self.model,
            "You extract structured stay criteria from free text.",
            format_extract_criteria_prompt(preferences),
            Criteria::openai_schema(),
        );

        let json_str = self
            .client
            .structured_output(request)
            .await
            .map_err(SearchError::ai)?;

        Ok(serde_json::from_str(&json_str)?)
    }

    async fn summarize_listing(&self, url: &str, page_text: &str) -> Result<String> {
        let user = format!(
            "URL: {}\n\nPage text:\n{}",
            url,
            truncate_to_char_boundary(page_text, MAX_PAGE_TEXT_BYTES)
        );

        self.chat(SUMMARIZE_LISTING_PROMPT, &user).await
    }

    async fn score_description(&self, criteria: &Criteria, summary: &str) -> Result<ScoredReview> {
        let system = format_score_description_prompt(&criteria.describe());

        self.structured_review(vec![
            Message::system(system),
            Message::user(summary.to_string()),
        ])
        .await
    }

    async fn score_images(
        &self,
        criteria: &Criteria,
        _url: &str,
        image_urls: &[String],
    ) -> Result<ScoredReview> {
        let system = format_score_images_prompt(&criteria.describe());

        self.structured_review(vec![
            Message::system(system),
            Message::user_with_images("The listing's photos:", image_urls.iter().cloned()),
        ])
        .await
    }

    async fn summarize_match(
        &self,
        criteria: &Criteria,
        description_reasoning: &str,
        image_reasoning: &str,
    ) -> Result<String> {
        let prompt = format_summarize_match_prompt(
            &criteria.describe(),
            description_reasoning,
            image_reasoning,
        );

        let request = ChatRequest::new(&self.model)
            .message(Message::user(prompt))
            .temperature(self.temperature);

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(SearchError::ai)?;

        Ok(response.content)
    }

    async fn example_query(&self) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::user(EXAMPLE_QUERY_PROMPT))
            .temperature(self.temperature);

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(SearchError::ai)?;

        Ok(response.content.trim().to_string())
    }
}
