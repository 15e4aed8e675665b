//! In-memory `Cache` fakes for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Cache, CacheError};

/// A map-backed fake that records the TTL applied to each write.
#[derive(Default)]
pub struct FakeCache {
    entries: RwLock<HashMap<String, (String, u64)>>,
}

impl FakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The TTL the last write to `key` carried, if any.
    pub async fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.read().await.get(key).map(|(_, ttl)| *ttl)
    }
}

#[async_trait]
impl Cache for FakeCache {
    async fn ping(&self) -> Result<String, CacheError> {
        Ok("PONG".to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<String, CacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok("OK".to_string())
    }
}

/// A fake whose every operation fails, standing in for an unreachable Redis.
pub struct DownCache;

fn unreachable_error() -> CacheError {
    CacheError::Redis(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "connection refused",
    )))
}

#[async_trait]
impl Cache for DownCache {
    async fn ping(&self) -> Result<String, CacheError> {
        Err(unreachable_error())
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(unreachable_error())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> Result<String, CacheError> {
        Err(unreachable_error())
    }
}
