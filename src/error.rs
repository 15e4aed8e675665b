//! Error types for the service
//!
//! One unified error for the handler layer, built with thiserror. Client
//! input problems carry their message through to the response verbatim;
//! dependency failures are logged in full and degraded to a generic body
//! so internals never leak to the caller.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::decode::MalformedRequest;
use crate::cache::CacheError;
use crate::models::ErrorResponse;

// == API Error Enum ==
/// Everything a request handler can fail with.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The decoder rejected the body; status and message pass through as-is
    #[error("{0}")]
    Malformed(#[from] MalformedRequest),

    /// A decoded request failed semantic validation (e.g. empty key)
    #[error("{0}")]
    InvalidRequest(String),

    /// Endpoint called with an unsupported HTTP method
    #[error("Invalid request method [{method}], supported methods include [{allowed}]")]
    MethodNotAllowed { method: Method, allowed: String },

    /// The key has no value in the cache; distinct from every cache failure
    #[error("No matching record found in redis database for key '{0}'")]
    KeyNotFound(String),

    /// The cache round-trip itself failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Serializing the response body failed
    #[error("Failed to encode response body")]
    Encode(#[source] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Malformed(mr) => (mr.status, mr.message.clone()),
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::MethodNotAllowed { .. } => {
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string())
            }
            ApiError::KeyNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Cache(err) => {
                error!(error = %err, "cache operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            ApiError::Encode(err) => {
                error!(error = %err, "response encoding failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
