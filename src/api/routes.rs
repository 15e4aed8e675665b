//! API Routes
//!
//! Configures the Axum router with all service endpoints. Every route is
//! registered with `any()`: method enforcement happens inside the handlers
//! so a mismatch can answer with the list of accepted verbs.

use axum::{routing::any, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    debug_handler, ping_handler, read_handler, readyz_handler, write_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/ping` - liveness round-trip against the cache
/// - `/healthz` - readiness probe (cache must answer)
/// - `/debug` - active configuration dump
/// - `POST`/`PUT /write-redis` - write a key with TTL
/// - `GET /read-redis` - read a key
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ping", any(ping_handler))
        .route("/healthz", any(readyz_handler))
        .route("/debug", any(debug_handler))
        .route("/write-redis", any(write_handler))
        .route("/read-redis", any(read_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
