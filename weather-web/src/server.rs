//! Server bootstrap: state construction, middleware and graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use weather_core::{Config, provider_from_config};

use crate::{routes, state::AppState, templates::PageTemplates};

/// Build state from config. The config is read once here and injected.
pub fn state_from_config(config: &Config) -> anyhow::Result<AppState> {
    let provider = provider_from_config(config).context("Failed to build weather provider")?;
    let templates = PageTemplates::new().context("Failed to compile page templates")?;

    Ok(AppState::new(Arc::from(provider), templates, config.site.clone()))
}

/// Router with request tracing attached.
pub fn app(state: AppState) -> Router {
    routes::create_router(state).layer(TraceLayer::new_for_http())
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = state_from_config(&config)?;
    let bind = config.site.bind.as_str();

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;

    info!(
        addr = %listener.local_addr()?,
        default_city = %config.site.default_city,
        "Weather page listening"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
