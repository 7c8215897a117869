use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::dao::storage::StorageError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required argument is missing or unusable.
    #[error("{0}")]
    InvalidArgument(String),
    /// Requested player or NFT does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Storage backend failed or returned an unusable document.
    #[error("storage error")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Storage(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .into_values()
            .flatten()
            .filter_map(|error| error.message.as_ref().map(ToString::to_string))
            .next()
            .unwrap_or_else(|| format!("validation failed: {err}"));
        ServiceError::InvalidArgument(message)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Internal server error.
    #[error("internal server error")]
    Internal,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidArgument(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Storage(source) => {
                error!(error = %source, details = ?source, "storage operation failed");
                AppError::Internal
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON payload carried by every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable reason.
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn storage_failures_hide_details() {
        let storage = StorageError::unavailable(
            "mongodb://secret-host refused".into(),
            io::Error::other("connection refused"),
        );
        let app: AppError = ServiceError::from(storage).into();

        assert!(matches!(app, AppError::Internal));
        assert_eq!(app.to_string(), "internal server error");
        assert_eq!(
            app.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn taxonomy_maps_to_status_codes() {
        let bad: AppError = ServiceError::InvalidArgument("playerId is required".into()).into();
        assert_eq!(bad.to_string(), "playerId is required");
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        let missing: AppError = ServiceError::NotFound("player not found".into()).into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }
}
