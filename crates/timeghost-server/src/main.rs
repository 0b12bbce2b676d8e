//! Binary entry point for the Timeghost server.
//!
//! Loads `timeghost-config.yaml` (or `TIMEGHOST_CONFIG`), initializes
//! tracing, loads the catalog and templates, then serves until `Ctrl-C`.

use std::sync::Arc;

use timeghost_server::config::LoggingConfig;
use timeghost_server::{AppState, ServerSettings, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, catalog or template loading fails,
/// or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ServerSettings::load()?;
    init_tracing(&settings.logging);

    info!("timeghost-server starting");

    let state = AppState::from_settings(&settings)?;
    info!(
        events = state.catalog.len(),
        templates = %settings.templates.dir.display(),
        max_tries = state.max_tries,
        "state loaded"
    );

    start_server(&settings.server, Arc::new(state)).await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
