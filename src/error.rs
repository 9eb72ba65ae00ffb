//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Tenant id is required")]
    MissingTenant,

    #[error("Unknown tenant")]
    InvalidTenant,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error_type: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::MissingTenant => {
                (StatusCode::BAD_REQUEST, "missing_tenant", self.to_string())
            }
            AppError::InvalidTenant => (StatusCode::NOT_FOUND, "invalid_tenant", self.to_string()),
            // Opaque on purpose: the body never says why access was denied.
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", "Forbidden".to_string()),
            AppError::InvalidRange(_) => {
                (StatusCode::BAD_REQUEST, "invalid_range", self.to_string())
            }
            AppError::InvalidMonth(_) => {
                (StatusCode::BAD_REQUEST, "invalid_month", self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error_type, message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
