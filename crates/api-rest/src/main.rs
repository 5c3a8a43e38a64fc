//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when only the HTTP surface is needed. The workspace's main
//! `diet-run` binary also loads `.env` before starting the same router.

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use diet_core::resolve_parser_config;

/// Main entry point for the diet REST API server
///
/// # Environment Variables
/// - `DIET_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `DIET_PARSER_CONFIG`: Optional YAML file overriding parser keywords, bounds and placeholders
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the parser configuration cannot be read or is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("DIET_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let config_path = std::env::var("DIET_PARSER_CONFIG").ok().map(PathBuf::from);

    let cfg = Arc::new(resolve_parser_config(config_path.as_deref())?);

    tracing::info!("-- Starting diet REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(AppState::new(cfg))).await?;

    Ok(())
}
