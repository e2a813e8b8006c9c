mod archive;
mod catalog;
mod config;
mod credits;
mod error;
mod gemini;
mod models;
mod modules;
mod preset;
mod prompt;
mod routes;
mod selection;
mod session;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::routes::{router, spawn_idle_sweeper, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    let gemini = GeminiClient::new(&config);
    if gemini.is_demo() {
        tracing::warn!("⚠️ GEMINI_API_KEY not set, serving placeholder images");
    } else {
        tracing::info!("Using API key: {} (model {})", config.masked_api_key(), config.gemini_image_model);
    }

    let port = config.port;
    let state = AppState::new(config, Arc::new(gemini));
    spawn_idle_sweeper(state.clone());

    let app = router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("👋 Shutting down");
}
