/// Error types for Board Service
///
/// Errors are converted to HTTP responses for API clients. `NotFound` is the only
/// domain failure; everything coming out of the document store is reported as a
/// generic store error.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::db::StoreError;

/// Result type for board-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested post or comment does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body failed field validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Malformed request (bad JSON, bad query parameters)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Document store operation failed
    #[error("Store error: {0}")]
    StoreError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn post_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Post not found with id: {}", id))
    }

    pub fn comment_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Comment not found with id: {}", id))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::StoreError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StoreError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
