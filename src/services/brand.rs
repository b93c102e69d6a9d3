// SPDX-License-Identifier: MIT

//! Brand territory loading.

use crate::geometry::{compute_area, validate_and_build_path, GeometryError};
use crate::models::BrandTerritory;
use geo::Polygon;
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// Catalog of sponsored zones, loaded once at startup.
#[derive(Debug, Default, Clone)]
pub struct BrandService {
    territories: Vec<BrandTerritory>,
}

impl BrandService {
    /// Load brand territories from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, BrandError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| BrandError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load brand territories from a GeoJSON string.
    ///
    /// Each feature needs a Polygon geometry and `id`, `name`, `brand`
    /// properties; `color` defaults to gold. Area is measured from the
    /// outer ring.
    pub fn load_from_json(json_data: &str) -> Result<Self, BrandError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| BrandError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(BrandError::ParseError(
                "expected a FeatureCollection".to_string(),
            ));
        };

        let mut territories = Vec::with_capacity(collection.features.len());

        for feature in collection.features {
            let text = |key: &str| {
                feature
                    .property(key)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            };

            let id = text("id").ok_or(BrandError::MissingProperty("id"))?;
            let name = text("name").ok_or(BrandError::MissingProperty("name"))?;
            let brand = text("brand").ok_or(BrandError::MissingProperty("brand"))?;
            let color = text("color").unwrap_or_else(|| "#FFD700".to_string());

            let Some(geometry) = feature.geometry else {
                return Err(BrandError::UnsupportedGeometry(id));
            };
            let polygon: Polygon<f64> = geometry
                .value
                .try_into()
                .map_err(|_| BrandError::UnsupportedGeometry(id.clone()))?;

            let ring: Vec<[f64; 2]> = polygon.exterior().coords().map(|c| [c.x, c.y]).collect();
            let path = validate_and_build_path(&ring).map_err(|e| BrandError::Geometry {
                id: id.clone(),
                source: e,
            })?;

            territories.push(BrandTerritory {
                id,
                name,
                brand,
                color,
                coordinates: path.closed_ring(),
                area: compute_area(&path),
                is_sponsored: true,
            });
        }

        tracing::info!(count = territories.len(), "Loaded brand territories");
        Ok(Self { territories })
    }

    /// Get the list of brand territories.
    pub fn territories(&self) -> &[BrandTerritory] {
        &self.territories
    }
}

/// Errors from brand territory loading.
#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Feature is missing property '{0}'")]
    MissingProperty(&'static str),

    #[error("Brand territory {0}: unsupported geometry (expected Polygon)")]
    UnsupportedGeometry(String),

    #[error("Brand territory {id}: {source}")]
    Geometry {
        id: String,
        #[source]
        source: GeometryError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ZONE: &str = r##"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"id": "b1", "name": "Zone", "brand": "Acme", "color": "#123456"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [0.0, 0.01], [0.01, 0.01], [0.01, 0.0], [0.0, 0.0]]]
            }
        }]
    }"##;

    #[test]
    fn test_load_single_zone() {
        let service = BrandService::load_from_json(ONE_ZONE).unwrap();
        let zone = &service.territories()[0];
        assert_eq!(zone.id, "b1");
        assert_eq!(zone.brand, "Acme");
        assert_eq!(zone.color, "#123456");
        assert!(zone.is_sponsored);
        assert_eq!(zone.coordinates.len(), 5);
        assert!((zone.area - 1.2364).abs() < 0.001, "area was {}", zone.area);
    }

    #[test]
    fn test_missing_brand_property() {
        let json = ONE_ZONE.replace(r#""brand": "Acme", "#, "");
        let err = BrandService::load_from_json(&json).unwrap_err();
        assert!(matches!(err, BrandError::MissingProperty("brand")));
    }

    #[test]
    fn test_point_geometry_rejected() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"id": "p", "name": "Pin", "brand": "Acme"},
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
            }]
        }"#;
        let err = BrandService::load_from_json(json).unwrap_err();
        assert!(matches!(err, BrandError::UnsupportedGeometry(_)));
    }

    #[test]
    fn test_not_a_collection() {
        let json = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(matches!(
            BrandService::load_from_json(json),
            Err(BrandError::ParseError(_))
        ));
    }
}
