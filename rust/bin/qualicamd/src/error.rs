use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use qualicam_kv::KVError;

/// Stable, machine-readable error codes.
///
/// Clients match on `code` from `{"code": "NOT_FOUND", "message": "..."}`.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Server error. Each variant maps to an error code and an HTTP status.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// HTTP 409.
    #[error("{0}")]
    Conflict(String),

    /// HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// HTTP 500.
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<KVError> for ServiceError {
    fn from(e: KVError) -> Self {
        ServiceError::Storage(e.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_code_mapping() {
        let cases = [
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT, "ALREADY_EXISTS"),
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            (ServiceError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn storage_errors_convert() {
        let err: ServiceError = KVError::Storage("disk full".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn display_is_just_message() {
        assert_eq!(ServiceError::NotFound("chapa 12345 not found".into()).to_string(), "chapa 12345 not found");
    }
}
