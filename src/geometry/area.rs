// SPDX-License-Identifier: MIT

//! Enclosed area and trace length.
//!
//! Area is computed in a local equirectangular projection centred on the
//! mean of the vertices, then measured with the planar shoelace formula.
//! Good to well under 1% for anything a person can run around.

use super::path::{Coordinate, Path};
use geo::{Area, Distance, Haversine, LineString, Point, Polygon};

/// Mean Earth radius (IUGG), kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Equirectangular projection to kilometers around a reference point.
///
/// x = R * dλ * cos(φ0), y = R * dφ
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocalProjection {
    origin_lng: f64,
    origin_lat: f64,
    cos_lat: f64,
}

impl LocalProjection {
    /// Centre on the vertex mean of all given points.
    ///
    /// Longitudes are unwrapped against the first point so that a trace
    /// crossing the antimeridian does not average out to the far side
    /// of the planet.
    pub(crate) fn centered_on<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::at(0.0, 0.0);
        };

        let (mut sum_lng, mut sum_lat, mut n) = (first.lng, first.lat, 1.0);
        for c in iter {
            sum_lng += first.lng + wrap_degrees(c.lng - first.lng);
            sum_lat += c.lat;
            n += 1.0;
        }

        Self::at(sum_lng / n, sum_lat / n)
    }

    fn at(origin_lng: f64, origin_lat: f64) -> Self {
        Self {
            origin_lng,
            origin_lat,
            cos_lat: origin_lat.to_radians().cos(),
        }
    }

    pub(crate) fn project(&self, c: &Coordinate) -> (f64, f64) {
        let d_lng = wrap_degrees(c.lng - self.origin_lng).to_radians();
        let d_lat = (c.lat - self.origin_lat).to_radians();
        (
            EARTH_RADIUS_KM * d_lng * self.cos_lat,
            EARTH_RADIUS_KM * d_lat,
        )
    }

    /// Project a path into a planar polygon (kilometers).
    pub(crate) fn polygon(&self, path: &Path) -> Polygon<f64> {
        let ring: LineString<f64> = path.points().iter().map(|c| self.project(c)).collect();
        // Polygon::new closes the ring.
        Polygon::new(ring, vec![])
    }
}

/// Normalize a longitude difference into [-180, 180).
fn wrap_degrees(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

/// Enclosed area of a closed path in square kilometers.
///
/// Never negative; collinear or otherwise degenerate rings give 0.0.
/// Winding order and starting vertex do not affect the result.
pub fn compute_area(path: &Path) -> f64 {
    let projection = LocalProjection::centered_on(path.points());
    let area = projection.polygon(path).unsigned_area();

    if area.is_finite() {
        area
    } else {
        0.0
    }
}

/// Length of the open trace in kilometers (great-circle, haversine).
pub fn path_length_km(path: &Path) -> f64 {
    path.points()
        .windows(2)
        .map(|w| segment_km(&w[0], &w[1]))
        .sum()
}

/// Length of the closed ring in kilometers, including the closing edge.
pub fn perimeter_km(path: &Path) -> f64 {
    let closing = match (path.points().first(), path.points().last()) {
        (Some(first), Some(last)) => segment_km(last, first),
        _ => 0.0,
    };
    path_length_km(path) + closing
}

fn segment_km(a: &Coordinate, b: &Coordinate) -> f64 {
    Haversine.distance(Point::from(*a), Point::from(*b)) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::validate_and_build_path;

    fn square(side: f64) -> Path {
        validate_and_build_path(&[[0.0, 0.0], [0.0, side], [side, side], [side, 0.0]]).unwrap()
    }

    #[test]
    fn test_equator_square_matches_projection_formula() {
        let side = 0.01_f64;
        let leg = EARTH_RADIUS_KM * side.to_radians();
        let expected = leg * leg * (side / 2.0).to_radians().cos();

        let area = compute_area(&square(side));
        assert!(
            (area - expected).abs() < 1e-9,
            "area {} != expected {}",
            area,
            expected
        );
    }

    #[test]
    fn test_equator_square_close_to_flat_earth_estimate() {
        let rough = (0.01 * 111.32_f64).powi(2);
        let area = compute_area(&square(0.01));
        assert!(
            ((area - rough) / rough).abs() < 0.01,
            "area {} not within 1% of {}",
            area,
            rough
        );
    }

    #[test]
    fn test_collinear_is_zero() {
        let path = validate_and_build_path(&[[0.0, 0.0], [0.001, 0.001], [0.002, 0.002]]).unwrap();
        assert!(compute_area(&path).abs() < 1e-12);
    }

    #[test]
    fn test_area_shrinks_with_latitude() {
        let at = |lat: f64| {
            validate_and_build_path(&[
                [10.0, lat],
                [10.0, lat + 0.01],
                [10.01, lat + 0.01],
                [10.01, lat],
            ])
            .unwrap()
        };
        let equator = compute_area(&at(0.0));
        let north = compute_area(&at(60.0));
        // cos(60°) = 0.5
        assert!((north / equator - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_antimeridian_square() {
        let across = validate_and_build_path(&[
            [179.995, 0.0],
            [179.995, 0.01],
            [-179.995, 0.01],
            [-179.995, 0.0],
        ])
        .unwrap();
        let area = compute_area(&across);
        let reference = compute_area(&square(0.01));
        assert!(((area - reference) / reference).abs() < 1e-6);
    }

    #[test]
    fn test_path_length_and_perimeter() {
        let path = square(0.01);
        let leg = path_length_km(&path) / 3.0;
        // ~1.112 km per 0.01° at the equator
        assert!((leg - 1.112).abs() < 0.005, "leg was {}", leg);
        assert!((perimeter_km(&path) - 4.0 * leg).abs() < 0.005);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(359.99_f64).round(), 0.0);
        assert!((wrap_degrees(-359.99) - 0.01).abs() < 1e-9);
        assert_eq!(wrap_degrees(180.0), -180.0);
    }
}
