//! HTTP surface for the World Bank query service.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::routes::{
    health_route::health,
    query::query_route::{ask_get, query_post},
    reindex_route::reindex,
    root_route::root,
};

/// Loads state, builds the router, and serves until ctrl-c.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let state = Arc::new(AppState::from_env()?);

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/query", post(query_post))
        .route("/ask", get(ask_get))
        .route("/reindex", post(reindex))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!("API listening on {host_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
