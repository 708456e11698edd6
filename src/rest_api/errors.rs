//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Input Errors (400)
    // ==================
    /// Query parameter that must be numeric was not
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Routing Errors
    // ==================
    /// Unmatched or unexpected path segment
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    MethodNotAllowed(&'static str),

    // ==================
    // Backend Errors (500)
    // ==================
    /// Expression, scan, put and decode failures, text passed through as-is
    #[error("{0}")]
    Backend(#[from] StoreError),

    /// Response body could not be encoded
    #[error("Failed to encode response: {0}")]
    Serialize(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            ApiError::NotFound => StatusCode::NOT_FOUND,

            // 405 Method Not Allowed
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,

            // 500 Internal Server Error
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidQueryParam("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed("POST not implemented").status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Serialize("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_error_text_passes_through() {
        let err = ApiError::from(StoreError::Scan("throughput exceeded".to_string()));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Scan failed: throughput exceeded");
    }
}
