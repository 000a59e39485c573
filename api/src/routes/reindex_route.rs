//! POST /reindex — re-embed the indicator catalog into Qdrant.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::info;

use crate::{core::app_state::AppState, error_handler::AppResult};

#[derive(Serialize)]
pub struct ReindexResponse {
    pub indexed: usize,
}

pub async fn reindex(State(state): State<Arc<AppState>>) -> AppResult<Json<ReindexResponse>> {
    let indexed = state.engine.reindex().await?;
    info!(indexed, "reindex: completed");
    Ok(Json(ReindexResponse { indexed }))
}
