//! Response DTOs for the service API

use serde::Serialize;

/// Response body for a successful cache read (`GET /read-redis`)
///
/// Only produced on a hit; an absent key is a 404, never an empty value.
#[derive(Debug, Clone, Serialize)]
pub struct ReadResult {
    /// The stored value
    pub value: String,
}

impl ReadResult {
    /// Creates a new ReadResult
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
