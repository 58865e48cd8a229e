//! HTTP error mapping with problem-details JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type for the HTTP layer.
///
/// Storage failures keep their diagnostic split: an unreachable store maps
/// to 503, a missing table (schema skew between contexts) or any other
/// engine failure maps to 500 with a distinct message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<folio_store::Error> for AppError {
    fn from(err: folio_store::Error) -> Self {
        match err {
            folio_store::Error::Validation(msg) => Self::BadRequest(msg),
            folio_store::Error::StoreUnavailable(msg) => Self::StorageUnavailable(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Problem-details body attached to every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    title: String,
    status: u16,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            status: status.as_u16(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
