//! Typed error for indicator resolution.

use thiserror::Error;

/// The single failure mode of resolution: every retrieved candidate was
/// eliminated by the hard constraints.
///
/// Carries the synthesized query string so operators can see what the
/// retrieval stage was actually asked.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no suitable indicator after constraints for query='{query}'")]
    NoResolvableIndicator { query: String },
}
