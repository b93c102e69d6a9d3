// SPDX-License-Identifier: MIT

//! Territory creation and overlap detection.
//!
//! Handles the create workflow:
//! 1. Validate request fields
//! 2. Validate and normalize the trace
//! 3. Measure enclosed area (and distance if the client sent none)
//! 4. Build the record to store

use crate::error::{AppError, Result};
use crate::geometry::{compute_area, intersection_area, perimeter_km, validate_and_build_path};
use crate::geometry::Path;
use crate::models::territory::{CreateTerritoryRequest, TerritoryOverlap};
use crate::models::{BrandTerritory, Territory};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use validator::Validate;

/// Smallest loop that counts as a territory: 100 m².
pub const DEFAULT_MIN_AREA_SQ_KM: f64 = 0.0001;

/// Builds territories from completed activities.
#[derive(Debug, Clone)]
pub struct TerritoryService {
    min_area_sq_km: f64,
}

impl Default for TerritoryService {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AREA_SQ_KM)
    }
}

impl TerritoryService {
    pub fn new(min_area_sq_km: f64) -> Self {
        Self { min_area_sq_km }
    }

    pub fn min_area_sq_km(&self) -> f64 {
        self.min_area_sq_km
    }

    /// Turn a create request into a new territory record.
    ///
    /// Nothing is persisted here; the caller stores the result.
    pub fn build_territory(
        &self,
        request: CreateTerritoryRequest,
        now: DateTime<Utc>,
    ) -> Result<Territory> {
        request.validate()?;

        let path = validate_and_build_path(&request.coordinates)?;
        let area = compute_area(&path);

        if area < self.min_area_sq_km {
            return Err(AppError::BadRequest(format!(
                "Territory too small: {:.6} km² (minimum {} km²)",
                area, self.min_area_sq_km
            )));
        }

        let distance = request
            .distance
            .unwrap_or_else(|| perimeter_km(&path));

        Ok(Territory {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: request.user_id,
            name: request.name,
            coordinates: path.closed_ring(),
            color: request.color,
            area,
            distance,
            duration: request.duration,
            is_sponsored: false,
            created_at: format_utc_rfc3339(now),
        })
    }

    /// Every stored or brand territory sharing area with `candidate`.
    ///
    /// Stored territories with unusable geometry are skipped.
    pub fn find_overlaps(
        &self,
        candidate: &Path,
        territories: &[Territory],
        brands: &[BrandTerritory],
    ) -> Vec<TerritoryOverlap> {
        let players = territories.iter().filter_map(|t| {
            overlap_with(candidate, &t.coordinates).map(|overlap_area| TerritoryOverlap {
                territory_id: t.id.clone(),
                name: t.name.clone(),
                owner: t.user_id.clone(),
                color: t.color.clone(),
                is_sponsored: t.is_sponsored,
                overlap_area,
            })
        });

        let sponsored = brands.iter().filter_map(|b| {
            overlap_with(candidate, &b.coordinates).map(|overlap_area| TerritoryOverlap {
                territory_id: b.id.clone(),
                name: b.name.clone(),
                owner: b.brand.clone(),
                color: b.color.clone(),
                is_sponsored: true,
                overlap_area,
            })
        });

        let mut overlaps: Vec<TerritoryOverlap> = players.chain(sponsored).collect();
        overlaps.sort_by(|a, b| b.overlap_area.total_cmp(&a.overlap_area));
        overlaps
    }
}

fn overlap_with(candidate: &Path, ring: &[[f64; 2]]) -> Option<f64> {
    let Ok(existing) = validate_and_build_path(ring) else {
        tracing::warn!(points = ring.len(), "Skipping territory with invalid geometry");
        return None;
    };
    let shared = intersection_area(candidate, &existing);
    (shared > 0.0).then_some(shared)
}
