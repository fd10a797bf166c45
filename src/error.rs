//! Error types for the recipes server
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Recipe Error Enum ==
/// Unified error type for the recipes server.
///
/// Every operation fails with exactly one of these kinds; the HTTP layer
/// maps each kind to a status code and nothing else is translated.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Malformed or missing input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Referenced recipe does not exist
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Underlying storage failure
    #[error("Store error: {0}")]
    Store(String),
}

impl From<rusqlite::Error> for RecipeError {
    fn from(err: rusqlite::Error) -> Self {
        RecipeError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Store(format!("encoding failed: {}", err))
    }
}

impl From<JsonRejection> for RecipeError {
    fn from(rejection: JsonRejection) -> Self {
        RecipeError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        let status = match &self {
            RecipeError::Validation(_) => StatusCode::BAD_REQUEST,
            RecipeError::NotFound(_) => StatusCode::NOT_FOUND,
            RecipeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            RecipeError::Validation(msg) => msg,
            RecipeError::NotFound(_) => "Recipe not found".to_string(),
            RecipeError::Store(msg) => {
                tracing::error!("Store failure: {}", msg);
                msg
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the recipes server.
pub type Result<T> = std::result::Result<T, RecipeError>;
