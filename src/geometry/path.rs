// SPDX-License-Identifier: MIT

//! Coordinate and path validation.
//!
//! Raw traces arrive as `[[lng, lat], ...]` pairs, longitude first.

use super::GeometryError;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Bounds check. NaN and infinities fail both ranges.
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lng) && (-90.0..=90.0).contains(&self.lat)
    }

    /// Bit-level key; folds -0.0 into 0.0.
    fn key(&self) -> (u64, u64) {
        ((self.lng + 0.0).to_bits(), (self.lat + 0.0).to_bits())
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lng, c.lat]
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.lng, c.lat)
    }
}

/// A validated, implicitly closed trace.
///
/// Points are stored open: the closing edge from the last point back to
/// the first is never materialized here.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Coordinate>,
}

impl Path {
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The ring with the first point repeated at the end, as stored.
    pub fn closed_ring(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .chain(self.points.first())
            .map(|&c| c.into())
            .collect()
    }
}

/// Validate a raw `[lng, lat]` sequence and build a [`Path`].
///
/// Bounds are checked before anything else. An explicit closing point
/// equal to the first point is dropped, as are immediate repeats
/// (GPS fixes recorded while standing still).
pub fn validate_and_build_path<P: AsRef<[f64]>>(raw: &[P]) -> Result<Path, GeometryError> {
    let mut points: Vec<Coordinate> = Vec::with_capacity(raw.len());

    for (index, pair) in raw.iter().enumerate() {
        let coordinate = match pair.as_ref() {
            &[lng, lat] => Coordinate::new(lng, lat),
            other => {
                return Err(GeometryError::InvalidCoordinate {
                    index,
                    detail: format!("expected [lng, lat], got {} values", other.len()),
                })
            }
        };

        if !coordinate.is_valid() {
            return Err(GeometryError::InvalidCoordinate {
                index,
                detail: format!(
                    "[{}, {}] outside lng [-180, 180] / lat [-90, 90]",
                    coordinate.lng, coordinate.lat
                ),
            });
        }

        if points.last().map(Coordinate::key) != Some(coordinate.key()) {
            points.push(coordinate);
        }
    }

    if points.len() > 1 && points.first().map(Coordinate::key) == points.last().map(Coordinate::key)
    {
        points.pop();
    }

    let distinct = points.iter().map(Coordinate::key).collect::<HashSet<_>>().len();
    if distinct < 3 {
        return Err(GeometryError::InsufficientPoints { found: distinct });
    }

    Ok(Path { points })
}
