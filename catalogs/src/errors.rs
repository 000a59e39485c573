//! Typed errors for catalog loading and country resolution.

use thiserror::Error;

/// Top-level error for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O or filesystem errors while reading catalog files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSONL row failed strict deserialization.
    #[error("parse error: {0}")]
    Parse(String),

    /// The question named no country at all.
    #[error("no country specified")]
    EmptyCountry,

    /// The country text matched no known alias.
    #[error("could not map country '{0}' to a World Bank code")]
    UnknownCountry(String),
}
