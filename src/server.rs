//! HTTP server initialization and runtime setup.
//!
//! Handles the metrics exporter, the store connection and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::ShortenerSettings;
use crate::config::Config;
use crate::domain::repositories::KvStore;
use crate::infrastructure::store::RedisStore;
use crate::routes::app_router;
use crate::state::AppState;
use crate::telemetry::recorder::install_exporter;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - Prometheus exporter (unless disabled)
/// - Redis connection, verified with a PING
/// - Axum HTTP server
///
/// Returns once a shutdown signal was received and in-flight requests have
/// drained. The store connection is released afterwards.
///
/// # Errors
///
/// Returns an error if:
/// - The metrics exporter cannot be installed
/// - Redis is unreachable at startup
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    if let Some(addr) = config.metrics_socket()? {
        install_exporter(addr)?;
    }

    let store = RedisStore::connect(&config.redis_url)
        .await
        .context("Failed to connect to Redis")?;
    let store: Arc<dyn KvStore> = Arc::new(store);

    let state = AppState::new(store, &ShortenerSettings::from(&config));
    let app = app_router(state);

    let addr = config.listen_socket()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing store connection");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
