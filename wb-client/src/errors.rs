//! Typed error for the World Bank client.

use thiserror::Error;

/// Errors from fetching indicator data upstream.
#[derive(Debug, Error)]
pub enum WbError {
    /// HTTP client construction or request-building failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// All retry attempts exhausted.
    #[error("World Bank API error after {attempts} attempts: {last_error}")]
    Upstream { attempts: u32, last_error: String },
}
