//! Typed error for the extraction client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while extracting raw fields from a question.
///
/// Normalization itself is total and has no error path; only the LLM call
/// can fail.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Invalid endpoint (empty or missing http/https).
    #[error("invalid Ollama endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        snippet: String,
    },

    /// The model output held no usable JSON object.
    #[error("failed to decode extraction: {0}")]
    Decode(String),
}
