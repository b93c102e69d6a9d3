// SPDX-License-Identifier: MIT

//! Territory routes: capture, browse, delete, over-capture.

use crate::error::{AppError, Result};
use crate::geometry::validate_and_build_path;
use crate::models::territory::{
    ClaimTerritoryRequest, CreateTerritoryRequest, OverlapQuery, TerritoryOverlap,
};
use crate::models::{BrandTerritory, Territory};
use crate::routes::{users::MessageResponse, ApiJson};
use crate::services::claim::ClaimRequest;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/territories", post(create_territory).get(list_territories))
        .route("/api/territories/overlaps", post(find_overlaps))
        .route(
            "/api/territories/{territory_id}",
            get(get_territory).delete(delete_territory),
        )
        .route("/api/territories/{territory_id}/claim", put(claim_territory))
        .route("/api/brand-territories", get(list_brand_territories))
}

// ─── Capture ─────────────────────────────────────────────────

/// Create a territory from a completed run.
async fn create_territory(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CreateTerritoryRequest>,
) -> Result<Json<Territory>> {
    let territory = state
        .territory_service
        .build_territory(input, chrono::Utc::now())?;

    state.db.set_territory(&territory).await?;

    tracing::info!(
        territory_id = %territory.id,
        user_id = %territory.user_id,
        area_sq_km = territory.area,
        points = territory.coordinates.len(),
        "Territory captured"
    );
    Ok(Json(territory))
}

// ─── Browse ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct TerritoriesQuery {
    /// Only territories owned by this user
    user_id: Option<String>,
}

async fn list_territories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TerritoriesQuery>,
) -> Result<Json<Vec<Territory>>> {
    let territories = state
        .db
        .list_territories(params.user_id.as_deref())
        .await?;
    Ok(Json(territories))
}

async fn get_territory(
    State(state): State<Arc<AppState>>,
    Path(territory_id): Path<String>,
) -> Result<Json<Territory>> {
    state
        .db
        .get_territory(&territory_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Territory {} not found", territory_id)))
}

async fn delete_territory(
    State(state): State<Arc<AppState>>,
    Path(territory_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_territory(&territory_id).await? {
        return Err(AppError::NotFound(format!(
            "Territory {} not found",
            territory_id
        )));
    }

    tracing::info!(territory_id = %territory_id, "Territory deleted");
    Ok(Json(MessageResponse {
        message: "Territory deleted successfully".to_string(),
    }))
}

// ─── Over-capture ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClaimResponse {
    pub success: bool,
    pub territory: Territory,
}

/// Reassign a territory to a new owner.
async fn claim_territory(
    State(state): State<Arc<AppState>>,
    Path(territory_id): Path<String>,
    ApiJson(input): ApiJson<ClaimTerritoryRequest>,
) -> Result<Json<ClaimResponse>> {
    input.validate()?;

    let mut request = ClaimRequest::new(territory_id, input.new_owner_id, input.new_color);
    if let Some(raw) = input.coordinates.as_deref() {
        request = request.with_path(validate_and_build_path(raw)?);
    }

    tracing::debug!(
        territory_id = %request.territory_id,
        challenger = %request.challenger_id,
        policy = ?state.config.claim_policy,
        "Claim requested"
    );

    let territory = state
        .db
        .claim_territory_atomic(&request, state.config.claim_policy)
        .await?;

    Ok(Json(ClaimResponse {
        success: true,
        territory,
    }))
}

// ─── Overlap ─────────────────────────────────────────────────

/// Which existing territories would a candidate loop cut into?
async fn find_overlaps(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<OverlapQuery>,
) -> Result<Json<Vec<TerritoryOverlap>>> {
    let candidate = validate_and_build_path(&input.coordinates)?;
    let territories = state.db.list_territories(None).await?;

    let overlaps = state.territory_service.find_overlaps(
        &candidate,
        &territories,
        state.brand_service.territories(),
    );
    Ok(Json(overlaps))
}

// ─── Brand zones ─────────────────────────────────────────────

async fn list_brand_territories(State(state): State<Arc<AppState>>) -> Json<Vec<BrandTerritory>> {
    Json(state.brand_service.territories().to_vec())
}
