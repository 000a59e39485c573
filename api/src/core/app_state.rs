//! Shared state for all HTTP handlers.

use crate::core::engine::{EngineConfig, QueryEngine};
use crate::error_handler::AppResult;

/// Application state: the engine plus anything handlers report about it.
pub struct AppState {
    pub engine: QueryEngine,
}

impl AppState {
    /// Builds shared state from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let cfg = EngineConfig::from_env();
        Ok(Self {
            engine: QueryEngine::new(&cfg)?,
        })
    }
}
