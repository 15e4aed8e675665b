//! Redis Tester - an HTTP front-end for a Redis cache
//!
//! Decodes bounded, strictly-validated JSON requests and maps them onto
//! point `GET`/`SET`/`PING` operations against an external Redis.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_tester::api::{create_router, AppState};
use redis_tester::cache::RedisCache;
use redis_tester::config::Config;

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration (.env file overlaid by the environment)
/// 3. Connect to Redis and ping it once - unreachable Redis is fatal here
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on the configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_tester=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting redis-tester");

    let config = Arc::new(Config::load());
    info!("Configuration loaded: {:?}", config);

    // One liveness check before accepting any traffic; failing it
    // terminates the process rather than limping into request handling.
    let cache = RedisCache::connect(&config).await.with_context(|| {
        format!(
            "connecting to the Redis cache at {}:{} (db {})",
            config.redis_address, config.redis_port, config.redis_db
        )
    })?;
    info!("Connected to Redis and received pong when testing the connection");

    let state = AppState::new(Arc::new(cache), config.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding listener on {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
