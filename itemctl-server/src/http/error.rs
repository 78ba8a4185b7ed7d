//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Storage failures are logged in full and reported generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

/// Message returned for every unknown or malformed item id
pub const ITEM_NOT_FOUND: &str = "Item not found!";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Field validation failed (400)
    Validation(ValidationError),

    /// Unreadable body or storage constraint violation (400)
    BadRequest { message: String },

    /// Item does not exist (404)
    NotFound,

    /// Storage failure (500, logged)
    Storage(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() })),
            Self::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Self::NotFound => (StatusCode::NOT_FOUND, json!({ "message": ITEM_NOT_FOUND })),
            Self::Storage(e) => {
                // Log the actual error, return generic message
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(message) => Self::BadRequest { message },
            _ => Self::Storage(e),
        }
    }
}
