// SPDX-License-Identifier: MIT

//! Leaderboard rows.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Points awarded per held territory.
pub const POINTS_PER_TERRITORY: u64 = 100;

/// Per-owner totals before user enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerTotals {
    pub user_id: String,
    pub territories: u64,
    /// Square kilometers
    pub total_area: f64,
    /// Kilometers
    pub total_distance: f64,
}

/// One ranked player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub color: String,
    pub territories: u64,
    /// Square kilometers, 4 decimals
    pub total_area: f64,
    /// Kilometers, 2 decimals
    pub total_distance: f64,
    pub points: u64,
}
