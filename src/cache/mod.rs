//! Cache Module
//!
//! The access abstraction over the external Redis cache: a session-scoped
//! client exposing point `ping`/`get`/`set` operations, behind an
//! object-safe trait so handlers can be tested against a substitutable
//! fake.

pub mod client;

pub use client::{Cache, CacheError, RedisCache};

#[cfg(test)]
pub mod test_util;
