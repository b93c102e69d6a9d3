// SPDX-License-Identifier: MIT

//! Territory geometry: path validation, area, distance and overlap.
//!
//! Everything in here is pure. Callers own logging and error mapping.

pub mod area;
pub mod overlap;
pub mod path;

pub use area::{compute_area, path_length_km, perimeter_km, EARTH_RADIUS_KM};
pub use overlap::{intersection_area, region_area};
pub use path::{validate_and_build_path, Coordinate, Path};

/// Errors from path validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Invalid coordinate at index {index}: {detail}")]
    InvalidCoordinate { index: usize, detail: String },

    #[error("Path needs at least 3 distinct points, got {found}")]
    InsufficientPoints { found: usize },
}
