//! Request DTOs for the service API
//!
//! Incoming shapes are decoded strictly: a payload field with no
//! counterpart here is rejected. Fields default when absent so that
//! semantic validation (non-empty key) stays separate from JSON-shape
//! validation.

use serde::Deserialize;

/// Request body for a cache write (`POST`/`PUT /write-redis`)
///
/// # Fields
/// - `key`: the cache key to write
/// - `value`: the value to store
/// - `ttl`: optional TTL in seconds; absent or zero means the configured
///   default applies
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteRequest {
    /// The cache key
    #[serde(default)]
    pub key: String,
    /// The value to store
    #[serde(default)]
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl WriteRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("key must not be empty".to_string());
        }
        None
    }

    /// The TTL to apply: the caller's value, or `default_ttl` when the
    /// request omitted it or sent zero. The cache client itself never
    /// substitutes a default.
    pub fn resolved_ttl(&self, default_ttl: u64) -> u64 {
        match self.ttl {
            None | Some(0) => default_ttl,
            Some(ttl) => ttl,
        }
    }
}

/// Request body for a cache read (`GET /read-redis`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadRequest {
    /// The cache key to look up
    #[serde(default)]
    pub key: String,
}

impl ReadRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("key must not be empty".to_string());
        }
        None
    }
}
