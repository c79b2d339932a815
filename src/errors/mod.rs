//! Error handling module for the dashboard backend.
//!
//! Provides the error taxonomy with mapping to HTTP status codes and the `{ "error": ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::storage::StorageError;

/// Messages surfaced to callers.
pub mod messages {
    pub const DATABASE_NOT_CONFIGURED: &str = "Database not configured";
    pub const INTERNAL_ERROR: &str = "Internal server error";
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const CONTENT_REQUIRED: &str = "Content is required";
    pub const USER_NOT_FOUND: &str = "User not found";
    pub const SERVER_CONFIG_NOT_FOUND: &str = "Server configuration not found";
    pub const SERVER_UPDATE_FAILED: &str = "Failed to update configuration or server not found";
    pub const INVALID_API_KEY: &str = "Missing or invalid API key";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Storage has no connection string
    ConfigurationMissing,
    /// Missing required input
    Validation(String),
    /// No valid session
    Unauthorized(String),
    /// Lookup miss
    NotFound(String),
    /// A write matched nothing
    UpdateFailed(String),
    /// Any failure inside the database layer; the detail is never sent to the caller
    Storage(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConfigurationMissing => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpdateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message returned to the caller.
    pub fn message(&self) -> String {
        match self {
            AppError::ConfigurationMissing => messages::DATABASE_NOT_CONFIGURED.to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::UpdateFailed(msg) => msg.clone(),
            AppError::Storage(_) => messages::INTERNAL_ERROR.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Storage(detail) => write!(f, "storage failure: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Storage(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotConfigured => AppError::ConfigurationMissing,
            StorageError::Connect(e) => {
                tracing::error!("Database connection failed: {:?}", e);
                AppError::Storage(e.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Stored record is not valid JSON: {:?}", err);
        AppError::Storage(err.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}
