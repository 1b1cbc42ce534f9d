//! HTTP surface of the project tracker.
//!
//! Handlers stay thin: they extract typed request structs, call
//! [`crate::service::ProjectService`] and map its errors onto status codes
//! through [`WebError`].

pub mod app;
pub mod handlers;
pub mod state;

pub use app::build_router;
pub use state::AppState;

use crate::core::ServiceError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum WebError {
    /// Invalid input: 400.
    Input(String),
    /// Duplicate eid: also 400, with its own code.
    Conflict(String),
    NotFound(String),
    /// Unexpected failure: 500 with a generic message.
    Internal(String),
}

impl WebError {
    /// Maps a service error. `failure` is the client-facing message used when
    /// the store itself failed; the cause is logged, not returned.
    pub fn from_service(err: ServiceError, failure: &str) -> Self {
        match err {
            ServiceError::Validation(err) => Self::Input(err.to_string()),
            ServiceError::Conflict(message) => Self::Conflict(message),
            ServiceError::NotFound(_) => Self::NotFound("Project not found".to_string()),
            ServiceError::Storage(err) => {
                error!(error = %err, "{failure}");
                Self::Internal(failure.to_string())
            }
        }
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        WebError::Input(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        WebError::Input(rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            WebError::Input(msg) => (StatusCode::BAD_REQUEST, msg, "validation_error"),
            WebError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg, "duplicate_eid"),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "not_found"),
            WebError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
