// SPDX-License-Identifier: MIT

//! Area invariants over realistic traces.
//!
//! If these fail, every newly captured territory is mis-measured and the
//! leaderboard tie-breaks go with it.

use capture_api::geometry::{
    compute_area, validate_and_build_path, GeometryError, EARTH_RADIUS_KM,
};

/// A handful of shapes: square, concave "L", irregular pentagon, a
/// high-latitude loop and a dense GPS-like circle.
fn shapes() -> Vec<Vec<[f64; 2]>> {
    let circle: Vec<[f64; 2]> = (0..72)
        .map(|i| {
            let t = (i as f64) * std::f64::consts::TAU / 72.0;
            [-122.41 + 0.004 * t.cos(), 37.77 + 0.003 * t.sin()]
        })
        .collect();

    vec![
        vec![[0.0, 0.0], [0.0, 0.01], [0.01, 0.01], [0.01, 0.0]],
        vec![
            [77.60, 12.90],
            [77.61, 12.90],
            [77.61, 12.905],
            [77.605, 12.905],
            [77.605, 12.91],
            [77.60, 12.91],
        ],
        vec![
            [77.6390, 12.9780],
            [77.6420, 12.9810],
            [77.6450, 12.9790],
            [77.6440, 12.9750],
            [77.6400, 12.9740],
        ],
        vec![[24.93, 60.16], [24.95, 60.16], [24.95, 60.17], [24.93, 60.17]],
        circle,
    ]
}

fn relative_diff(a: f64, b: f64) -> f64 {
    if a == b {
        0.0
    } else {
        (a - b).abs() / a.abs().max(b.abs())
    }
}

#[test]
fn test_area_is_invariant_under_reversal() {
    for shape in shapes() {
        let forward = compute_area(&validate_and_build_path(&shape).unwrap());
        let mut reversed = shape.clone();
        reversed.reverse();
        let backward = compute_area(&validate_and_build_path(&reversed).unwrap());

        assert!(
            relative_diff(forward, backward) < 1e-9,
            "reversal changed area: {} vs {}",
            forward,
            backward
        );
    }
}

#[test]
fn test_area_is_invariant_under_rotation() {
    for shape in shapes() {
        let base = compute_area(&validate_and_build_path(&shape).unwrap());
        for k in 1..shape.len() {
            let mut rotated = shape.clone();
            rotated.rotate_left(k);
            let area = compute_area(&validate_and_build_path(&rotated).unwrap());
            assert!(
                relative_diff(base, area) < 1e-9,
                "rotation by {} changed area: {} vs {}",
                k,
                base,
                area
            );
        }
    }
}

#[test]
fn test_area_is_never_negative() {
    for shape in shapes() {
        let path = validate_and_build_path(&shape).unwrap();
        assert!(compute_area(&path) >= 0.0);

        let mut reversed = shape.clone();
        reversed.reverse();
        assert!(compute_area(&validate_and_build_path(&reversed).unwrap()) >= 0.0);
    }
}

#[test]
fn test_explicit_closing_point_does_not_change_area() {
    for shape in shapes() {
        let open = compute_area(&validate_and_build_path(&shape).unwrap());
        let mut closed = shape.clone();
        closed.push(shape[0]);
        let closed = compute_area(&validate_and_build_path(&closed).unwrap());
        assert!(relative_diff(open, closed) < 1e-12);
    }
}

#[test]
fn test_equator_square_area() {
    let path =
        validate_and_build_path(&[[0.0, 0.0], [0.0, 0.01], [0.01, 0.01], [0.01, 0.0]]).unwrap();
    let area = compute_area(&path);

    // Flat-earth estimate at 111.32 km per degree.
    let rough = (0.01_f64 * 111.32).powi(2);
    assert!(relative_diff(area, rough) < 0.01, "area was {}", area);

    // Exact value of the projection used.
    let leg = EARTH_RADIUS_KM * 0.01_f64.to_radians();
    let exact = leg * leg * 0.005_f64.to_radians().cos();
    assert!(relative_diff(area, exact) < 1e-9);
}

#[test]
fn test_circle_close_to_ellipse_formula() {
    let shapes = shapes();
    let circle = shapes.last().unwrap();
    let area = compute_area(&validate_and_build_path(circle).unwrap());

    let km_per_deg = EARTH_RADIUS_KM * 1f64.to_radians();
    let a = 0.004 * km_per_deg * 37.77_f64.to_radians().cos();
    let b = 0.003 * km_per_deg;
    let ellipse = std::f64::consts::PI * a * b;
    // 72-gon inscribed in the ellipse loses ~0.13%
    assert!(relative_diff(area, ellipse) < 0.005, "{} vs {}", area, ellipse);
}

#[test]
fn test_fewer_than_three_points() {
    assert!(matches!(
        validate_and_build_path(&[[0.0, 0.0], [0.0, 0.01]]),
        Err(GeometryError::InsufficientPoints { found: 2 })
    ));
    assert!(matches!(
        validate_and_build_path(&[[0.0, 0.0], [0.0, 0.01], [0.0, 0.0]]),
        Err(GeometryError::InsufficientPoints { .. })
    ));
}

#[test]
fn test_out_of_range_coordinate() {
    assert!(matches!(
        validate_and_build_path(&[[0.0, 0.0], [200.0, 10.0], [0.01, 0.01], [0.01, 0.0]]),
        Err(GeometryError::InvalidCoordinate { index: 1, .. })
    ));
}

#[test]
fn test_degenerate_line_has_zero_area() {
    let path = validate_and_build_path(&[[10.0, 10.0], [10.0, 10.01], [10.0, 10.02]]).unwrap();
    assert!(compute_area(&path) < 1e-12);
}
