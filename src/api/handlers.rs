//! API Handlers
//!
//! One handler per endpoint, each a short stateless pipeline:
//! method check, decode, cache operation, encode. Any failure drops
//! straight into the error response for that stage; there are no retries.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{ReadRequest, ReadResult, WriteRequest};

use super::decode::{decode_json_request, encode_json_body};

/// Dependencies shared by every handler, injected at construction.
///
/// The cache handle is one shared session; the transport multiplexes
/// concurrent calls, so no locking happens at this layer.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache session
    pub cache: Arc<dyn Cache>,
    /// Immutable configuration snapshot
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState over the given cache and configuration.
    pub fn new(cache: Arc<dyn Cache>, config: Arc<Config>) -> Self {
        Self { cache, config }
    }
}

/// Rejects methods outside `allowed` with a 405 listing the accepted verbs.
fn check_supported_method(allowed: &[Method], method: &Method) -> Result<()> {
    if allowed.contains(method) {
        return Ok(());
    }
    let allowed = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ApiError::MethodNotAllowed {
        method: method.clone(),
        allowed,
    })
}

/// Handler for `/ping` (any method)
///
/// Round-trips a liveness check and returns the cache's literal reply;
/// an unreachable cache surfaces as a 500.
pub async fn ping_handler(State(state): State<AppState>) -> Result<String> {
    info!("Handling a ping...");
    let reply = state.cache.ping().await?;
    Ok(reply)
}

/// Handler for `/healthz` (any method)
///
/// Readiness probe: succeeds only when the cache dependency answers a live
/// ping, distinguishing "service up" from "dependency up".
pub async fn readyz_handler(State(state): State<AppState>) -> Result<&'static str> {
    info!("Handling a readiness probe...");
    state.cache.ping().await?;
    Ok("ok")
}

/// Handler for `/debug` (any method)
///
/// Dumps the active configuration (password redacted by its Debug impl).
pub async fn debug_handler(State(state): State<AppState>) -> String {
    info!("Dumping debug information...");
    format!("Configuration:\n==========\n[{:?}]\n", state.config)
}

/// Handler for `POST`/`PUT /write-redis`
///
/// Decodes a WriteRequest, resolves the TTL (absent or zero falls back to
/// the configured default), writes the key and returns the cache's
/// acknowledgement text verbatim.
pub async fn write_handler(State(state): State<AppState>, req: Request) -> Result<Response> {
    info!("Handling a cache write...");
    check_supported_method(&[Method::POST, Method::PUT], req.method())?;

    // Create vs. update is not distinguished beyond logging; both perform
    // an unconditional set.
    if req.method() == Method::POST {
        info!("Processing POST request for a new cache entry");
    } else {
        info!("Processing PUT request to update an existing cache entry");
    }

    let write: WriteRequest = decode_json_request(req, state.config.max_body_size).await?;
    if let Some(msg) = write.validate() {
        return Err(ApiError::InvalidRequest(msg));
    }

    let ttl = write.resolved_ttl(state.config.default_ttl);
    let ack = state.cache.set(&write.key, &write.value, ttl).await?;
    Ok(ack.into_response())
}

/// Handler for `GET /read-redis`
///
/// Decodes a ReadRequest and looks the key up; an absent key is a 404,
/// a hit comes back as `{"value": ...}` JSON.
pub async fn read_handler(State(state): State<AppState>, req: Request) -> Result<Response> {
    info!("Handling a cache read...");
    check_supported_method(&[Method::GET], req.method())?;

    let read: ReadRequest = decode_json_request(req, state.config.max_body_size).await?;
    if let Some(msg) = read.validate() {
        return Err(ApiError::InvalidRequest(msg));
    }

    match state.cache.get(&read.key).await? {
        Some(value) => encode_json_body(&ReadResult::new(value)),
        None => Err(ApiError::KeyNotFound(read.key)),
    }
}
