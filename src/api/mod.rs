//! API Module
//!
//! The HTTP surface: request decoding, per-endpoint handlers and routing.
//!
//! # Endpoints
//! - `/ping` - liveness round-trip against the cache
//! - `/healthz` - readiness probe
//! - `/debug` - configuration dump
//! - `POST`/`PUT /write-redis` - write a key with TTL
//! - `GET /read-redis` - read a key

pub mod decode;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
