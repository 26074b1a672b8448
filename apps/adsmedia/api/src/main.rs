use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_adsmedia::AdsMediaClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        base_url = %config.adsmedia.base_url,
        timeout = ?config.adsmedia.timeout,
        "Configuring ADSMedia client"
    );

    // One client for the whole process; handlers share it through router state
    let client = Arc::new(AdsMediaClient::from_config(config.adsmedia.clone())?);

    let api_routes = api::routes(client.clone());

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /health: liveness check with app name/version
    // - /ready: pings ADSMedia with the configured key
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(client));

    info!("Starting ADSMedia API with graceful shutdown (30s timeout)");

    create_production_app(app, &config.server, Duration::from_secs(30), async {
        info!("Shutting down: no connections to close");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ADSMedia API shutdown complete");
    Ok(())
}
