//! Canonical geometry types used across all fishcat crates.
//!
//! These types provide a bridge between GeoJSON serialization and the
//! computational geo crate types. The catalog only ever stores two shapes:
//! sample points and multi-polygon boundaries.

use serde::{Deserialize, Serialize};

/// GeoJSON-compatible geometry representation
///
/// This enum directly maps to GeoJSON geometry types with coordinate arrays.
/// Points are always `(longitude, latitude)` in WGS 84 (EPSG:4326) degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

impl Geometry {
    /// Create a Point geometry from (longitude, latitude)
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point { coordinates: [lon, lat] }
    }

    /// Create a MultiPolygon geometry
    pub fn multi_polygon(polygons: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
        Geometry::MultiPolygon { coordinates: polygons }
    }

    /// Try to parse from a serde_json::Value (GeoJSON)
    pub fn from_geojson(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
