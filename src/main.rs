//! zin-fan-bridge - LX Z:in ventilation fan bridge
//!
//! Validates the configured device against the Z:in cloud, polls its state in
//! the background, and serves the fan, lamp and sensor entities over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zin_fan_bridge::api;
use zin_fan_bridge::bridge::BridgeState;
use zin_fan_bridge::config;
use zin_fan_bridge::poll::DevicePoller;
use zin_fan_bridge::setup::{SetupFlow, SetupInput};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zin_fan_bridge=info,tower_http=debug".into()),
        )
        .init();

    tracing::info!("Starting zin-fan-bridge...");

    // Load configuration
    let config = config::Config::load()?;
    tracing::info!("Configuration loaded");

    // Validate the device and take its first snapshot
    let mut setup = SetupFlow::new(config.api.clone());
    let outcome = setup
        .submit(SetupInput {
            user_id: config.device.user_id.clone(),
            device_id: config.device.device_id.clone(),
        })
        .await?;
    tracing::info!(
        "Device ready: {} ({})",
        outcome.entry.title,
        outcome.entry.device_id
    );

    let state = BridgeState::new(outcome.client, config.poll.clone()).await;

    // Background poller
    let poller = Arc::new(DevicePoller::new(state.clone(), config.poll.tick()));
    tokio::spawn(async move {
        poller.start().await;
    });

    let app = api::routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
