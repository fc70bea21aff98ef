//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use visualbrief_core::Config;

/// Initialize the application: telemetry, shared state and routes.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        provider = config.analysis_provider.as_str(),
        "Configuration loaded and validated successfully"
    );
    if config.analysis_api_key().is_none() {
        tracing::warn!(
            env_var = config.analysis_provider.api_key_var(),
            "Analysis API key not set; analysis requests will fail until it is configured"
        );
    }

    let state = Arc::new(AppState::new(config.clone()));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
