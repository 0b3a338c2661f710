//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::generation::{GenerationError, PipelineError};

/// Shown to clients when the model produced nothing usable
pub const GENERATION_FAILED_MESSAGE: &str =
    "AI could not generate a suitable recipe. Please try different ingredients or preferences.";

/// Shown to clients when a generated recipe could not be saved
pub const PERSISTENCE_FAILED_MESSAGE: &str = "Failed to generate recipe. Please try again.";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Caller does not own the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The model did not produce a valid recipe
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// A generated recipe could not be stored
    #[error("Persistence failed: {0}")]
    Persistence(#[source] common::error::DatabaseError),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Generation(e) => ApiError::Generation(e),
            PipelineError::Persistence(e) => ApiError::Persistence(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Generation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                GENERATION_FAILED_MESSAGE.to_string(),
            ),
            ApiError::Persistence(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                PERSISTENCE_FAILED_MESSAGE.to_string(),
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
