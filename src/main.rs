use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use diet_core::resolve_parser_config;

/// Main entry point for the diet application
///
/// Loads `.env`, resolves the parser configuration once and serves the REST API.
///
/// # Environment Variables
/// - `DIET_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DIET_PARSER_CONFIG`: Optional YAML file overriding parser keywords, bounds and placeholders
/// - `RUST_LOG`: Extra tracing directives
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("diet=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("DIET_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let config_path = std::env::var("DIET_PARSER_CONFIG").ok().map(PathBuf::from);

    let cfg = Arc::new(resolve_parser_config(config_path.as_deref())?);

    tracing::info!("++ Starting diet REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(AppState::new(cfg))).await?;

    Ok(())
}
