// SPDX-License-Identifier: MIT

use capture_api::config::Config;
use capture_api::db::FirestoreDb;
use capture_api::routes::create_router;
use capture_api::services::{BrandService, TerritoryService};
use capture_api::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Unique suffix for test isolation.
#[allow(dead_code)]
pub fn unique_id(prefix: &str) -> String {
    format!("TEST_{}_{}", prefix, uuid::Uuid::new_v4())
}

/// Create a test app with an offline database and the bundled brand zones.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let brand_service = BrandService::load_from_file(&config.brand_territories_path)
        .expect("Failed to load brand territories - is data/ committed?");

    let state = Arc::new(AppState {
        territory_service: TerritoryService::new(config.min_territory_area_sq_km),
        config,
        db: FirestoreDb::new_mock(),
        brand_service,
    });

    (create_router(state.clone()), state)
}

/// Same app, backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let brand_service = BrandService::load_from_file(&config.brand_territories_path)
        .expect("Failed to load brand territories - is data/ committed?");

    let state = Arc::new(AppState {
        territory_service: TerritoryService::new(config.min_territory_area_sq_km),
        config,
        db: test_db().await,
        brand_service,
    });

    (create_router(state.clone()), state)
}

/// A ~0.14 km² loop in Indiranagar, closed explicitly.
#[allow(dead_code)]
pub fn sample_loop() -> serde_json::Value {
    serde_json::json!([
        [77.638, 12.975],
        [77.642, 12.975],
        [77.642, 12.972],
        [77.638, 12.972],
        [77.638, 12.975]
    ])
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
