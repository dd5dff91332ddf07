use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;

#[derive(Debug)]
pub enum ApiError {
    /// Referenced id absent. Some endpoints (blog delete) answer with
    /// an empty 404 body, matching `None` here.
    NotFound(Option<String>),

    ValidationError(String),

    /// Unique constraint violated
    DuplicateKey(String),

    /// Id not in the expected shape
    MalformedId(String),

    /// Ownership mismatch. Deliberately answers 400, not 403.
    Forbidden(String),

    /// Bad credentials, or a mutating endpoint called without identity
    Unauthorized(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(Some(msg)) => write!(f, "Not found: {}", msg),
            ApiError::NotFound(None) => write!(f, "Not found"),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            ApiError::MalformedId(msg) => write!(f, "Malformed id: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(Some(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::NotFound(None) => {
                return StatusCode::NOT_FOUND.into_response();
            }
            ApiError::ValidationError(msg)
            | ApiError::DuplicateKey(msg)
            | ApiError::MalformedId(msg)
            | ApiError::Forbidden(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "a database error occurred".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: error_message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(Some(msg.into()))
    }

    pub const fn not_found_empty() -> Self {
        ApiError::NotFound(None)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn duplicate_username() -> Self {
        ApiError::DuplicateKey("expected `username` to be unique".to_string())
    }

    pub fn malformed_id(raw: &str) -> Self {
        ApiError::MalformedId(format!("malformed id: {raw}"))
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}
