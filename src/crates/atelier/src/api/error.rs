//! API error types and HTTP response conversion
//!
//! Converts registry errors to appropriate HTTP status codes and renders
//! every error with the common envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::registry::RegistryError;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Custom API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation error
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Conflict with the entity's current lifecycle state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Registry(err) => match err {
                RegistryError::ProjectNotFound(_) | RegistryError::TaskNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                RegistryError::Conflict(_) | RegistryError::InvalidTransition { .. } => {
                    StatusCode::CONFLICT
                }
                RegistryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
        }
    }

    /// Get the error code identifier
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Registry(err) => match err {
                RegistryError::ProjectNotFound(_) | RegistryError::TaskNotFound(_) => "NOT_FOUND",
                RegistryError::Conflict(_) | RegistryError::InvalidTransition { .. } => "CONFLICT",
                RegistryError::Validation(_) => "VALIDATION_ERROR",
            },
        }
    }

    /// Get the error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::ValidationError(_) => "ValidationError",
            ApiError::Conflict(_) => "Conflict",
            ApiError::InternalError(_) => "InternalError",
            ApiError::Registry(err) => match err {
                RegistryError::ProjectNotFound(_) | RegistryError::TaskNotFound(_) => "NotFound",
                RegistryError::Conflict(_) | RegistryError::InvalidTransition { .. } => "Conflict",
                RegistryError::Validation(_) => "ValidationError",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(self.error_type(), self.to_string(), self.code());

        tracing::error!("API Error: {:?}", body);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_error() {
        let err = ApiError::NotFound("resource".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.error_type(), "NotFound");
    }

    #[test]
    fn validation_error() {
        let err = ApiError::ValidationError("invalid input".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn conflict_error() {
        let err = ApiError::Conflict("already running".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "CONFLICT");
    }

    #[test]
    fn registry_not_found_maps_to_404() {
        let err = ApiError::from(RegistryError::TaskNotFound(Uuid::new_v4()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_type(), "NotFound");
    }

    #[test]
    fn registry_conflict_maps_to_409() {
        let err = ApiError::from(RegistryError::Conflict("busy".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError::from(RegistryError::InvalidTransition {
            from: crate::domain::TaskStatus::Completed,
            to: crate::domain::TaskStatus::Running,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn registry_validation_maps_to_422() {
        let err = ApiError::from(RegistryError::Validation("name is required".to_string()));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
