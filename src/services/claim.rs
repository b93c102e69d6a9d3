// SPDX-License-Identifier: MIT

//! Claim (over-capture) resolution.
//!
//! By default anyone can take any player territory: the claim reassigns
//! owner and color and leaves everything else alone. An overlap rule can
//! be switched on in config, in which case the challenger must have
//! actually run around a large enough share of the target.

use crate::geometry::{intersection_area, region_area, validate_and_build_path};
use crate::geometry::{GeometryError, Path};
use crate::models::Territory;

/// How contested claims are decided.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ClaimPolicy {
    /// Every claim on an existing territory succeeds.
    #[default]
    Unconditional,
    /// The challenger's trace must cover at least `fraction` of the
    /// target's area.
    MinOverlap { fraction: f64 },
}

/// A user's attempt to take over a territory.
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    pub territory_id: String,
    pub challenger_id: String,
    pub new_color: String,
    /// Only needed for [`ClaimPolicy::MinOverlap`].
    pub challenger_path: Option<Path>,
}

impl ClaimRequest {
    pub fn new(
        territory_id: impl Into<String>,
        challenger_id: impl Into<String>,
        new_color: impl Into<String>,
    ) -> Self {
        Self {
            territory_id: territory_id.into(),
            challenger_id: challenger_id.into(),
            new_color: new_color.into(),
            challenger_path: None,
        }
    }

    pub fn with_path(mut self, path: Path) -> Self {
        self.challenger_path = Some(path);
        self
    }
}

/// Errors from claim resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClaimError {
    #[error("Territory not found: {0}")]
    TerritoryNotFound(String),

    #[error("Territory {0} is sponsored and cannot be claimed")]
    NotClaimable(String),

    #[error("Claim requires the challenger's path")]
    MissingChallengerPath,

    #[error("Overlap {covered:.4} of target area is below required {required:.4}")]
    InsufficientOverlap { covered: f64, required: f64 },

    #[error("Stored territory geometry is invalid: {0}")]
    Geometry(#[from] GeometryError),
}

/// Decide the outcome of a claim against `territory`.
///
/// `territory` is the looked-up target; `None` means the id is unknown.
/// On success the returned record differs from the input only in
/// `user_id` and `color`. Nothing is mutated on failure.
pub fn resolve_claim(
    territory: Option<Territory>,
    request: &ClaimRequest,
    policy: ClaimPolicy,
) -> Result<Territory, ClaimError> {
    let mut territory =
        territory.ok_or_else(|| ClaimError::TerritoryNotFound(request.territory_id.clone()))?;

    if territory.is_sponsored {
        return Err(ClaimError::NotClaimable(territory.id));
    }

    if let ClaimPolicy::MinOverlap { fraction } = policy {
        let challenger = request
            .challenger_path
            .as_ref()
            .ok_or(ClaimError::MissingChallengerPath)?;
        let target = validate_and_build_path(&territory.coordinates)?;
        let covered = coverage(&target, challenger);
        if covered < fraction {
            return Err(ClaimError::InsufficientOverlap {
                covered,
                required: fraction,
            });
        }
    }

    territory.user_id = request.challenger_id.clone();
    territory.color = request.new_color.clone();
    Ok(territory)
}

/// Share of `target` covered by `challenger`, in [0, 1].
///
/// Both sides are measured by polygon clipping, so a self-crossing target
/// is judged on every lobe it encloses.
fn coverage(target: &Path, challenger: &Path) -> f64 {
    let target_area = region_area(target);
    if target_area <= 0.0 {
        return 1.0;
    }
    (intersection_area(target, challenger) / target_area).clamp(0.0, 1.0)
}
