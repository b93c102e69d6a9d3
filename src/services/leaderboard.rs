// SPDX-License-Identifier: MIT

//! Leaderboard aggregation over stored territories.

use crate::models::leaderboard::POINTS_PER_TERRITORY;
use crate::models::{LeaderboardEntry, OwnerTotals, Territory, User};
use std::collections::HashMap;

/// Default number of rows returned.
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound on rows a caller may request.
pub const MAX_LIMIT: usize = 100;

/// Group territories by owner and order them.
///
/// Most territories first, ties broken by total area (largest first),
/// then by user id so the order is stable.
pub fn rank_owners(territories: &[Territory]) -> Vec<OwnerTotals> {
    let mut by_owner: HashMap<&str, OwnerTotals> = HashMap::new();

    for t in territories {
        let totals = by_owner
            .entry(t.user_id.as_str())
            .or_insert_with(|| OwnerTotals {
                user_id: t.user_id.clone(),
                territories: 0,
                total_area: 0.0,
                total_distance: 0.0,
            });
        totals.territories += 1;
        totals.total_area += t.area;
        totals.total_distance += t.distance;
    }

    let mut ranked: Vec<OwnerTotals> = by_owner.into_values().collect();
    ranked.sort_by(|a, b| {
        b.territories
            .cmp(&a.territories)
            .then_with(|| b.total_area.total_cmp(&a.total_area))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    ranked
}

/// Attach user details and cut to `limit`.
///
/// Owners without a user record are dropped; ranks are numbered after
/// dropping so they stay contiguous.
pub fn build_leaderboard(
    ranked: Vec<OwnerTotals>,
    users: &HashMap<String, User>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    ranked
        .into_iter()
        .filter_map(|totals| {
            let user = users.get(&totals.user_id)?;
            Some((totals, user))
        })
        .take(limit)
        .enumerate()
        .map(|(i, (totals, user))| LeaderboardEntry {
            rank: i as u32 + 1,
            display_name: user.display_name.clone(),
            color: user.preferences.territory_color.clone(),
            points: totals.territories * POINTS_PER_TERRITORY,
            territories: totals.territories,
            total_area: round_to(totals.total_area, 4),
            total_distance: round_to(totals.total_distance, 2),
            user_id: totals.user_id,
        })
        .collect()
}

/// Clamp a requested limit into [1, MAX_LIMIT].
pub fn clamp_limit(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
