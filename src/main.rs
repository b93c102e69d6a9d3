// SPDX-License-Identifier: MIT

//! Capture API Server
//!
//! Turns recorded running loops into owned, stealable territories.

use capture_api::{
    config::Config,
    db::FirestoreDb,
    services::{BrandService, TerritoryService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        claim_policy = ?config.claim_policy,
        "Starting Capture API"
    );

    // Open the database handle; it lives until shutdown
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Load sponsored zones
    tracing::info!(path = %config.brand_territories_path, "Loading brand territories");
    let brand_service = match BrandService::load_from_file(&config.brand_territories_path) {
        Ok(service) => service,
        Err(e) => {
            tracing::warn!(error = %e, "Brand territories unavailable, serving none");
            BrandService::default()
        }
    };

    let territory_service = TerritoryService::new(config.min_territory_area_sq_km);
    tracing::debug!(
        min_area_sq_km = territory_service.min_area_sq_km(),
        brand_zones = brand_service.territories().len(),
        "Services ready"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        territory_service,
        brand_service,
    });

    // Build router
    let app = capture_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("capture_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
