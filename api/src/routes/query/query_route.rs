//! POST /query and GET /ask — answer a question about country indicators.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::{debug, info};

use crate::{
    core::{app_state::AppState, engine::QueryAnswer},
    error_handler::{AppError, AppResult},
    routes::query::query_request::{AskParams, QueryRequest},
};

/// Handler: POST /query
///
/// ```bash
/// curl -X POST http://127.0.0.1:8000/query \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is the GDP of Saudi Arabia in 2022?"}'
/// ```
pub async fn query_post(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryRequest>,
) -> AppResult<Json<QueryAnswer>> {
    answer(&state, &body.question).await.map(Json)
}

/// Handler: GET /ask?q=...
pub async fn ask_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> AppResult<Json<QueryAnswer>> {
    answer(&state, &params.q).await.map(Json)
}

async fn answer(state: &AppState, question: &str) -> AppResult<QueryAnswer> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("question must not be empty".into()));
    }

    debug!(question, "query: start");
    let answer = state.engine.answer(question).await?;
    info!(
        indicator = %answer.indicator_code,
        country = %answer.country,
        confidence = answer.confidence_margin,
        "query: answered"
    );
    Ok(answer)
}
