// SPDX-License-Identifier: MIT

//! Sponsored brand territories.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A sponsor-owned zone shown alongside player territories.
///
/// Brand territories are never claimable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BrandTerritory {
    pub id: String,
    pub name: String,
    /// Sponsor name (e.g., "MuscleBlaze")
    pub brand: String,
    pub color: String,
    /// Closed ring, `[lng, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
    /// Square kilometers
    pub area: f64,
    pub is_sponsored: bool,
}
