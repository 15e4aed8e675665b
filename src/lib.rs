//! Redis Tester - an HTTP front-end for a Redis cache
//!
//! Decodes bounded, strictly-validated JSON requests and maps them onto
//! point `GET`/`SET`/`PING` operations against an external Redis with
//! per-entry TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
