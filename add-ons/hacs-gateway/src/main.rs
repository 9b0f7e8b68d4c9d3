//! HACS Gateway — axum host for the HACS frontend.
//! Runs one frontend setup pass (bundle, iconset, sidebar panel, plugin endpoint), then serves.
//! Run: cargo run -p hacs-gateway  (dev bundle: HACS__FRONTEND__DEV=true HACS_FRONTEND_DIR=../frontend)

mod app;
mod config;
mod handlers;
mod host;
mod plugin_endpoint;
mod static_files;

use std::net::SocketAddr;

use hacs_frontend_core::AssetLocator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GatewayConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::load()?;
    let locator = AssetLocator::from_env(&config.frontend, config.packaged_bundle());
    let state = app::build_state(&config, locator);

    if let Err(e) = state.setup.setup().await {
        tracing::error!("HACS frontend setup failed: {}", e);
        if e.is_resource_not_found() {
            tracing::error!(
                "No frontend bundle found; set HACS__PACKAGED_FRONTEND_DIR to a built bundle"
            );
        }
        return Err(e.into());
    }

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port).parse()?;
    let app = app::router(state);
    tracing::info!("HACS gateway listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
