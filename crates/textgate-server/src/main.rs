//! Server entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together: the
//! provider backend is selected once, the dispatcher and coordinator are
//! constructed, and the HTTP server runs until a shutdown signal.

mod config;

use anyhow::Context;
use config::{Config, ProviderKind, WORKER_COUNT};
use std::sync::Arc;
use textgate_axum::{AppState, create_router};
use textgate_core::{CoordinatorConfig, Dispatcher, RequestCoordinator, TextProvider};
use textgate_providers::{GroqProvider, OpenAiProvider};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!(
        provider = %config.provider,
        addr = %config.server_addr,
        queue_capacity = config.queue_capacity,
        "configuration loaded"
    );

    let provider: Arc<dyn TextProvider> = match config.provider {
        ProviderKind::Groq => Arc::new(GroqProvider::new(config.groq_api_key.clone())),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config.openai_api_key.clone())),
    };

    let dispatcher = Arc::new(Dispatcher::new(
        config.queue_capacity,
        WORKER_COUNT,
        Arc::clone(&provider),
    ));
    let coordinator = Arc::new(RequestCoordinator::new(
        Arc::clone(&dispatcher),
        provider,
        CoordinatorConfig::default(),
    ));
    let app = create_router(AppState::new(coordinator));

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    info!(addr = %config.server_addr, "server started");

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("shutdown signal received");
            shutdown.cancel();
        });
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("server error")?;

    info!("http server stopped, draining dispatcher");
    dispatcher.shutdown().await;
    info!("shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
