// SPDX-License-Identifier: MIT

//! The bundled sponsored zones.

use capture_api::config::Config;
use capture_api::services::BrandService;
use std::collections::HashSet;

#[test]
fn test_bundled_zones_load() {
    let config = Config::test_default();
    let service = BrandService::load_from_file(&config.brand_territories_path).unwrap();
    let zones = service.territories();

    assert_eq!(zones.len(), 3);

    let ids: HashSet<&str> = zones.iter().map(|z| z.id.as_str()).collect();
    assert_eq!(ids.len(), zones.len(), "zone ids must be unique");

    for zone in zones {
        assert!(zone.is_sponsored);
        assert_eq!(zone.brand, "MuscleBlaze");
        // Neighbourhood-sized: somewhere between a park and a district
        assert!(
            zone.area > 0.1 && zone.area < 20.0,
            "{} has implausible area {}",
            zone.id,
            zone.area
        );
        assert_eq!(zone.coordinates.first(), zone.coordinates.last());
    }
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(BrandService::load_from_file("data/does_not_exist.geojson").is_err());
}
