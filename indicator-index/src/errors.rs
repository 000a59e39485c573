//! Unified error type for indexing and retrieval.

use reqwest::StatusCode;
use thiserror::Error;

/// Top-level error for indicator-index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Invalid embedding endpoint (empty or missing http/https).
    #[error("invalid Ollama endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error when calling the embedding provider.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from the embedding provider.
    #[error("unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        snippet: String,
    },

    /// Unexpected/invalid JSON from the embedding provider.
    #[error("failed to decode embedding response: {0}")]
    Decode(String),

    /// Mismatch between configured and returned vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Qdrant client errors (wrapped as text).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
