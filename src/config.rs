//! Configuration Module
//!
//! Loads server and Redis settings once at startup into an immutable
//! snapshot. Values come from the process environment, optionally overlaid
//! on a `.env` file in the working directory; because the `.env` loader
//! never overrides variables that are already set, the environment always
//! wins over the file.

use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::info;

/// Immutable server configuration, read once at startup.
///
/// # Environment Variables
/// - `REDISTESTER_SERVER_PORT` - HTTP listen port (default: 5678)
/// - `REDISTESTER_CERT_FILE` - TLS certificate path (default: empty)
/// - `REDISTESTER_KEY_FILE` - TLS key path (default: empty)
/// - `REDISTESTER_REDIS_ADDRESS` - Redis host (default: localhost)
/// - `REDISTESTER_REDIS_PORT` - Redis port (default: 6379)
/// - `REDISTESTER_REDIS_PASSWORD` - Redis password (default: empty)
/// - `REDISTESTER_REDIS_DB` - Redis logical database index (default: 0)
/// - `REDISTESTER_DEFAULT_TTL` - Default TTL in seconds for writes that
///   omit one (default: 300)
/// - `REDISTESTER_MAX_BODY_SIZE` - Request body ceiling in bytes
///   (default: 1048576)
#[derive(Clone)]
pub struct Config {
    /// HTTP listen port
    pub server_port: u16,
    /// TLS certificate path; recorded for the debug dump, unused otherwise
    pub cert_file: String,
    /// TLS key path; recorded for the debug dump, unused otherwise
    pub key_file: String,
    /// Redis host
    pub redis_address: String,
    /// Redis port
    pub redis_port: u16,
    /// Redis password, empty when the deployment runs without auth
    pub redis_password: String,
    /// Redis logical database index
    pub redis_db: i64,
    /// TTL in seconds applied to writes that omit one (or send 0)
    pub default_ttl: u64,
    /// Hard ceiling on request body size, in bytes
    pub max_body_size: usize,
}

impl Config {
    /// Loads configuration: `.env` file first (if present), then the
    /// process environment on top.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded configuration file {}", path.display()),
            Err(_) => info!("No config file provided, proceeding to OS environment"),
        }
        Self::from_env()
    }

    /// Creates a Config from environment variables alone, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            server_port: env_parse("REDISTESTER_SERVER_PORT", 5678),
            cert_file: env_string("REDISTESTER_CERT_FILE", ""),
            key_file: env_string("REDISTESTER_KEY_FILE", ""),
            redis_address: env_string("REDISTESTER_REDIS_ADDRESS", "localhost"),
            redis_port: env_parse("REDISTESTER_REDIS_PORT", 6379),
            redis_password: env_string("REDISTESTER_REDIS_PASSWORD", ""),
            redis_db: env_parse("REDISTESTER_REDIS_DB", 0),
            default_ttl: env_parse("REDISTESTER_DEFAULT_TTL", 300),
            max_body_size: env_parse("REDISTESTER_MAX_BODY_SIZE", 1_048_576),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5678,
            cert_file: String::new(),
            key_file: String::new(),
            redis_address: "localhost".to_string(),
            redis_port: 6379,
            redis_password: String::new(),
            redis_db: 0,
            default_ttl: 300,
            max_body_size: 1_048_576,
        }
    }
}

// The debug endpoint and startup logging both dump the whole Config, so the
// password never appears in plain text.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("cert_file", &self.cert_file)
            .field("key_file", &self.key_file)
            .field("redis_address", &self.redis_address)
            .field("redis_port", &self.redis_port)
            .field(
                "redis_password",
                &if self.redis_password.is_empty() {
                    ""
                } else {
                    "<redacted>"
                },
            )
            .field("redis_db", &self.redis_db)
            .field("default_ttl", &self.default_ttl)
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
