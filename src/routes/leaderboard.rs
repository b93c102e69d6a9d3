// SPDX-License-Identifier: MIT

//! Leaderboard route.

use crate::error::Result;
use crate::models::LeaderboardEntry;
use crate::services::leaderboard::{build_leaderboard, clamp_limit, rank_owners};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/leaderboard", get(get_leaderboard))
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

/// Top players by territory count.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let limit = clamp_limit(params.limit);

    let territories = state.db.list_territories(None).await?;
    let ranked = rank_owners(&territories);

    let owner_ids: Vec<String> = ranked.iter().map(|r| r.user_id.clone()).collect();
    let users = state.db.get_users(&owner_ids).await?;

    let board = build_leaderboard(ranked, &users, limit);
    tracing::debug!(
        territories = territories.len(),
        owners = owner_ids.len(),
        rows = board.len(),
        "Leaderboard built"
    );
    Ok(Json(board))
}
