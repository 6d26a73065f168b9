//! Unified error handling for `ai-llm-service`.
//!
//! One top-level [`AiLlmError`] for the whole crate. All messages carry the
//! `[AI LLM Service]` prefix to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Invalid endpoint (empty or missing http/https scheme).
    #[error("[AI LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,

    /// Underlying HTTP transport error.
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[AI LLM Service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[AI LLM Service] failed to decode response: {0}")]
    Decode(String),

    /// The configured model is not present on the backend.
    #[error("[AI LLM Service] model {model:?} is not available at {endpoint}")]
    ModelUnavailable {
        /// Configured model identifier.
        model: String,
        /// Endpoint that was probed.
        endpoint: String,
    },
}

/// Clamp a response body to a short log-friendly snippet.
pub(crate) fn make_snippet(body: &str) -> String {
    body.chars().take(240).collect()
}
