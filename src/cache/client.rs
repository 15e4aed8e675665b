//! Redis cache client.
//!
//! Owns one multiplexed connection to the external Redis, established and
//! liveness-checked at startup and shared by every request afterwards. The
//! client never retries and never invents TTLs; callers resolve the TTL
//! before the write reaches this layer.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

/// Errors surfaced by cache operations.
///
/// Key absence is not an error; `get` reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The underlying Redis call failed (unreachable, timeout, protocol)
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Point operations against the external cache.
///
/// Implementations must be safe for concurrent use from many request tasks
/// without per-call locking.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Round-trips a liveness check, returning the cache's literal reply.
    async fn ping(&self) -> Result<String, CacheError>;

    /// Fetches a key. `Ok(None)` means the key is absent or expired,
    /// distinct from every transport failure.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Writes a key with the given TTL in seconds, unconditionally
    /// overwriting any existing value. A TTL of zero writes without an
    /// expiry. Returns the cache's acknowledgement text verbatim.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<String, CacheError>;
}

/// The production `Cache` implementation over a shared connection manager.
///
/// Cloning the manager per call is a cheap handle copy; the transport
/// multiplexes concurrent commands over the one session.
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Establishes the Redis session and performs one `PING` before
    /// returning. An unreachable cache here is a startup failure for the
    /// caller to treat as fatal, not a per-request error.
    pub async fn connect(config: &Config) -> Result<Self, CacheError> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.redis_address.clone(), config.redis_port),
            redis: RedisConnectionInfo {
                db: config.redis_db,
                username: None,
                password: if config.redis_password.is_empty() {
                    None
                } else {
                    Some(config.redis_password.clone())
                },
                ..Default::default()
            },
        };

        let client = redis::Client::open(info)?;
        let manager = ConnectionManager::new(client).await?;

        let cache = Self { manager };
        cache.ping().await?;
        Ok(cache)
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn ping(&self) -> Result<String, CacheError> {
        debug!("Pinging the Redis cache...");
        let mut conn = self.manager.clone();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(reply)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        info!(key, "Fetching key from the Redis cache...");
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<String, CacheError> {
        info!(key, ttl_seconds, "Writing key to the Redis cache...");
        let mut conn = self.manager.clone();
        let ack: String = if ttl_seconds == 0 {
            conn.set(key, value).await?
        } else {
            conn.set_ex(key, value, ttl_seconds).await?
        };
        Ok(ack)
    }
}
