//! # REST API Errors
//!
//! Error types for the REST API module. Store failures are logged here and
//! reach the client only as an opaque message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::schema::{FieldError, ValidationError, BODY_FIELD};
use crate::storage::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload, query or path failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Item does not exist
    #[error("Item not found")]
    NotFound,

    /// Body sent without a JSON content type
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Request could not be read
    #[error("{0}")]
    BadRequest(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Backing store cannot be reached
    #[error("Service unavailable")]
    Unavailable,

    /// Any other store failure
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Unavailable(_) => {
                error!(code = err.code(), error = %err, "Store unavailable");
                ApiError::Unavailable
            }
            StoreError::Database(_) => {
                error!(code = err.code(), error = %err, "Store operation failed");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(r) => {
                ApiError::UnsupportedMediaType(r.body_text())
            }
            JsonRejection::JsonSyntaxError(r) => {
                ApiError::Validation(FieldError::new(BODY_FIELD, r.body_text()).into())
            }
            JsonRejection::JsonDataError(r) => {
                ApiError::Validation(FieldError::new(BODY_FIELD, r.body_text()).into())
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Validation error response body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(err) => {
                let body = ValidationErrorResponse {
                    detail: err.into_errors(),
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = ErrorResponse {
                    detail: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
