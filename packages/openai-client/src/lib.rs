//! Pure OpenAI REST API client
//!
//! A clean, minimal client for the OpenAI API with no domain-specific logic.
//! Supports chat completions (including multi-modal image input) and
//! structured outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::from_env()?;
//!
//! // Chat completion
//! let response = client.chat_completion(ChatRequest {
//!     model: "gpt-4o-mini".into(),
//!     messages: vec![Message::user("Hello!")],
//!     ..Default::default()
//! }).await?;
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Review {
//!     score: u8,
//!     reasoning: String,
//! }
//!
//! // Schema generated automatically from type!
//! let review: Review = client
//!     .extract::<Review>("gpt-4o-mini", system_prompt, user_prompt)
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Type-safe structured output extraction.
    ///
    /// Automatically generates a JSON schema from the type `T` using `schemars`,
    /// sends it to OpenAI, and deserializes the response.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let schema = T::openai_schema();
        let request = StructuredRequest::new(model, system_prompt, user_prompt, schema);
        self.extract_request(request).await
    }

    /// Structured extraction from prebuilt messages.
    ///
    /// Use this when the user turn needs multi-modal content
    /// ([`Message::user_with_images`]) or a non-default temperature.
    pub async fn extract_from_messages<T: StructuredOutput>(
        &self,
        model: &str,
        messages: Vec<Message>,
    ) -> Result<T> {
        let schema = T::openai_schema();
        let request = StructuredRequest::from_messages(model, messages, schema);
        self.extract_request(request).await
    }

    async fn extract_request<T: StructuredOutput>(
        &self,
        request: StructuredRequest,
    ) -> Result<T> {
        debug!(
            type_name = T::type_name(),
            model = %request.model,
            "structured extraction request"
        );

        let json_str = self.structured_output(request).await?;

        serde_json::from_str(&json_str)
            .map_err(|e| OpenAIError::Parse(format!("Failed to deserialize response: {}", e)))
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get a response.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(OpenAIError::Api(format!("OpenAI API error: {}", error_text)));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OpenAIError::Api("No response from OpenAI".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    /// Structured output with JSON schema.
    ///
    /// Uses OpenAI's `json_schema` response format for guaranteed valid JSON.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OpenAIError::Api(format!(
                "OpenAI structured output error: {}",
                error_text
            )));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OpenAIError::Api("No response from OpenAI".into()))
    }
}
