// SPDX-License-Identifier: MIT

//! Polygon intersection between two territories.

use super::area::LocalProjection;
use super::path::Path;
use geo::{Area, BooleanOps};

/// Area shared by two closed paths, in square kilometers.
///
/// Both rings are projected around their combined vertex mean so the
/// clipping happens in one planar frame.
pub fn intersection_area(a: &Path, b: &Path) -> f64 {
    let projection = LocalProjection::centered_on(a.points().iter().chain(b.points()));
    let shared = projection
        .polygon(a)
        .intersection(&projection.polygon(b))
        .unsigned_area();

    if shared.is_finite() {
        shared
    } else {
        0.0
    }
}

/// Area actually enclosed by a path, measured the way [`intersection_area`]
/// measures it.
///
/// Matches [`compute_area`](super::compute_area) for simple rings. For a
/// self-crossing trace (a figure eight) the shoelace lobes cancel, while
/// this counts every enclosed lobe once. Use it whenever a ratio against
/// [`intersection_area`] is needed.
pub fn region_area(path: &Path) -> f64 {
    intersection_area(path, path)
}
