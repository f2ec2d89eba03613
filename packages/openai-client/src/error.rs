//! Typed errors for the chat completions client.
//!
//! Every failure of a request falls into one of four buckets: the
//! client was never usable (`Config`), the request did not reach the
//! API (`Network`), the API rejected or short-changed it (`Api`), or
//! the response body did not have the promised shape (`Parse`).

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Failure modes of the chat completions client.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// The client could not be constructed (missing `OPENAI_API_KEY`)
    #[error("config error: {0}")]
    Config(String),

    /// The request produced no HTTP response (connect failure, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status, or a success response with no choices
    #[error("API error: {0}")]
    Api(String),

    /// The response body did not deserialize into the expected shape
    #[error("response parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure_mode() {
        let err = OpenAIError::Config("OPENAI_API_KEY not set".to_string());
        assert_eq!(err.to_string(), "config error: OPENAI_API_KEY not set");

        let err = OpenAIError::Api("rate limited".to_string());
        assert_eq!(err.to_string(), "API error: rate limited");
    }
}
