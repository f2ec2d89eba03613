//! Typed errors for the listing-search library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during a search pipeline run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Page rendering failed
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// Completion or structured-extraction service failed
    #[error("AI service error: {0}")]
    Ai(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stage result id did not resolve.
    ///
    /// Fatal to the stage that depends on it; the pipeline never
    /// proceeds on empty data in place of a missing dependency.
    #[error("missing stage result: {id}")]
    MissingStageResult { id: Uuid },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid criteria provided
    #[error("invalid criteria: {reason}")]
    InvalidCriteria { reason: String },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Wrap an arbitrary AI-service failure.
    pub fn ai(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Ai(err.into())
    }

    /// Wrap an arbitrary storage failure.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage(err.into())
    }
}

/// Errors that can occur while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Navigation or fetch timeout
    #[error("timeout rendering: {url}")]
    Timeout { url: String },

    /// Page produced no usable content
    #[error("empty page: {url}")]
    EmptyPage { url: String },
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
