//! Public application error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use catalogs::CatalogError;
use indicator_index::IndexError;
use indicator_resolver::ResolveError;
use question_parser::ExtractError;
use wb_client::WbError;

/// Unified error for startup and request handling.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    /// Catalog files unreadable/malformed at startup, or an unmappable
    /// country at request time.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    // --- Request pipeline ---
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    WorldBank(#[from] WbError),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Unanswerable questions are client-side problems.
            AppError::Catalog(CatalogError::EmptyCountry)
            | AppError::Catalog(CatalogError::UnknownCountry(_))
            | AppError::Resolve(_) => StatusCode::UNPROCESSABLE_ENTITY,

            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // Upstream collaborators (LLM, Qdrant, WB API).
            AppError::Extract(_) | AppError::Index(_) | AppError::WorldBank(_) => {
                StatusCode::BAD_GATEWAY
            }

            AppError::Bind(_) | AppError::Server(_) | AppError::Catalog(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Catalog(CatalogError::EmptyCountry)
            | AppError::Catalog(CatalogError::UnknownCountry(_)) => "COUNTRY_ERROR",
            AppError::Catalog(_) => "CATALOG_ERROR",
            AppError::Extract(_) => "EXTRACTION_ERROR",
            AppError::Index(_) => "INDEX_ERROR",
            AppError::Resolve(_) => "NO_RESOLVABLE_INDICATOR",
            AppError::WorldBank(_) => "WORLDBANK_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
