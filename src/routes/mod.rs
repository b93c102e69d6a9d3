// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod leaderboard;
pub mod territories;
pub mod users;

use crate::error::AppError;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::extract::FromRequest;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// JSON body extractor whose rejections use the API error format.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub build_id: String,
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub version: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now_rfc3339(),
        build_id,
    })
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to CAPTURE API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// CORS from the configured origin list.
///
/// A `*` entry opens the API to any origin; credentials are then off,
/// since browsers refuse the combination anyway.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed = origins.to_vec();
    base.allow_origin(AllowOrigin::predicate(
        move |origin: &HeaderValue, _request_parts: &axum::http::request::Parts| {
            let origin_str = origin.to_str().unwrap_or("");
            allowed.iter().any(|o| o == origin_str)
                || origin_str.starts_with("http://localhost")
                || origin_str.starts_with("http://127.0.0.1")
        },
    ))
    .allow_credentials(true)
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api = Router::new()
        .route("/api/", get(welcome))
        .route("/api/health", get(health_check))
        .merge(users::routes())
        .merge(territories::routes())
        .merge(leaderboard::routes());

    Router::new()
        .merge(api)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
