//! atelier server binary
//!
//! Standalone HTTP server for the orchestration service: project and
//! task management backed by the in-memory registry and the concurrent
//! task executor.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use atelier::api::create_router;
use atelier::config::ServerConfig;
use atelier::executor::{Executor, SimulatedWorker};
use atelier::registry::Registry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(rust_log).init();

    // Load configuration (defaults apply when the file is absent)
    let config = match ServerConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("Failed to load configuration: {}. Using defaults.", e);
            ServerConfig::default()
        }
    };
    tracing::info!("Server name: {}", config.server.name);
    tracing::info!(
        "Executor phase delay: {}ms",
        config.executor.phase_delay_ms
    );

    // Host/port from environment override the config file
    let host = std::env::var("HOST").unwrap_or_else(|_| config.server.host.clone());
    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse::<u16>().context("PORT must be a valid u16")?,
        Err(_) => config.server.port,
    };
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("invalid bind address")?;

    // Wire up registry and executor; lifecycle is tied to the process
    let registry = Arc::new(Registry::new());
    let worker = Arc::new(SimulatedWorker::new(config.executor.phase_delay()));
    let executor = Executor::new(registry.clone(), worker);

    // Build the router
    tracing::info!("Building API router");
    let app = create_router(registry, executor);

    tracing::info!("Starting atelier server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("atelier server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL-C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
