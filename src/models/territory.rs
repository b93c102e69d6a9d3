// SPDX-License-Identifier: MIT

//! Territory model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// A claimed polygon owned by one user.
///
/// `coordinates` is the closed ring, `[lng, lat]` pairs, longitude first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Territory {
    pub id: String,
    /// Owning user
    pub user_id: String,
    pub name: String,
    pub coordinates: Vec<[f64; 2]>,
    /// Display color (#RRGGBB)
    pub color: String,
    /// Enclosed area in square kilometers
    pub area: f64,
    /// Distance of the originating activity in kilometers
    pub distance: f64,
    /// Duration of the originating activity in seconds
    pub duration: u64,
    #[serde(default)]
    pub is_sponsored: bool,
    /// Creation time (RFC 3339, UTC)
    pub created_at: String,
}

/// Firestore document shape for a territory.
///
/// Firestore rejects arrays nested directly in arrays, so the ring is
/// stored as a list of `{lng, lat}` maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub coordinates: Vec<StoredCoordinate>,
    pub color: String,
    pub area: f64,
    pub distance: f64,
    pub duration: u64,
    #[serde(default)]
    pub is_sponsored: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoredCoordinate {
    pub lng: f64,
    pub lat: f64,
}

impl From<&Territory> for TerritoryRecord {
    fn from(t: &Territory) -> Self {
        Self {
            id: t.id.clone(),
            user_id: t.user_id.clone(),
            name: t.name.clone(),
            coordinates: t
                .coordinates
                .iter()
                .map(|&[lng, lat]| StoredCoordinate { lng, lat })
                .collect(),
            color: t.color.clone(),
            area: t.area,
            distance: t.distance,
            duration: t.duration,
            is_sponsored: t.is_sponsored,
            created_at: t.created_at.clone(),
        }
    }
}

impl From<TerritoryRecord> for Territory {
    fn from(r: TerritoryRecord) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            coordinates: r.coordinates.iter().map(|c| [c.lng, c.lat]).collect(),
            color: r.color,
            area: r.area,
            distance: r.distance,
            duration: r.duration,
            is_sponsored: r.is_sponsored,
            created_at: r.created_at,
        }
    }
}

/// Request body for creating a territory from a completed activity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTerritoryRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Raw trace, `[[lng, lat], ...]`. Closing point optional.
    pub coordinates: Vec<Vec<f64>>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    /// Kilometers. Computed from the trace when absent.
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    /// Seconds.
    pub duration: u64,
}

/// Request body for over-capturing a territory.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClaimTerritoryRequest {
    #[validate(length(min = 1, max = 128))]
    pub new_owner_id: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub new_color: String,
    /// Challenger's fresh trace. Only consulted by the overlap claim policy.
    #[serde(default)]
    pub coordinates: Option<Vec<Vec<f64>>>,
}

/// Request body for checking a candidate trace against existing territories.
#[derive(Debug, Clone, Deserialize)]
pub struct OverlapQuery {
    pub coordinates: Vec<Vec<f64>>,
}

/// One territory hit by an overlap check.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TerritoryOverlap {
    pub territory_id: String,
    pub name: String,
    /// Owning user, or the brand name for sponsored zones
    pub owner: String,
    pub color: String,
    pub is_sponsored: bool,
    /// Shared area in square kilometers
    pub overlap_area: f64,
}

/// Accepts `#RRGGBB`.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}
