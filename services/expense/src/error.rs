//! Custom error types for the expense service

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned when no usable credential accompanies a request
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// Message returned when a verified token names a user that does not exist
pub const INVALID_TOKEN: &str = "Invalid token";

/// Message returned when an expense is absent or owned by someone else
pub const EXPENSE_NOT_FOUND: &str = "Expense not found";

/// Custom error type for the expense service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, invalid or expired credential
    #[error("{0}")]
    Unauthorized(String),

    /// Client supplied incomplete or malformed data
    #[error("{0}")]
    Validation(String),

    /// Record absent, or not owned by the caller
    #[error("{0}")]
    NotFound(String),

    /// Unexpected runtime failure
    #[error("{0}")]
    Internal(String),

    /// Database error
    #[error("{0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    pub fn not_authorized() -> Self {
        ApiError::Unauthorized(NOT_AUTHORIZED.to_string())
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    }

    pub fn expense_not_found() -> Self {
        ApiError::NotFound(EXPENSE_NOT_FOUND.to_string())
    }

    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Credential failures answer with `error`, everything else with `message`.
        let body = match self {
            ApiError::Unauthorized(msg) => json!({ "error": msg }),
            ApiError::Validation(msg) | ApiError::NotFound(msg) => json!({ "message": msg }),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                json!({ "message": msg })
            }
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                json!({ "message": e.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
