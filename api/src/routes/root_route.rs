//! GET / — service banner with the endpoint map.

use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "World Bank Query API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /query": "Answer a question (JSON)",
            "GET /ask": "Answer a question (query param)",
            "GET /health": "Health check",
            "POST /reindex": "Re-embed the indicator catalog"
        }
    }))
}
