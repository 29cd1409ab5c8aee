//! Error types for the REST API layer.
//!
//! [`ApiError`] is the single client-visible failure type. It converts
//! into an Axum response carrying the spec'd `{"error": message}` body:
//! validation failures map to 400, unknown ids to 404, and anything else
//! to a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookwire_core::RegistryError;

/// Errors that can occur while serving a REST request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required input was missing or invalid. Client-correctable.
    #[error("{0}")]
    Validation(String),

    /// The referenced book does not exist.
    #[error("Book not found")]
    NotFound,

    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(msg) => Self::Validation(msg),
            RegistryError::NotFound(_) => Self::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
