//! Conversions between canonical geometry and `geo` crate types.

use fishcat_core::models::Geometry;
use fishcat_core::{CatalogError, Result};
use geo::{LineString, MultiPolygon, Point, Polygon};

/// Convert a canonical Point geometry to a geo::Point.
pub fn to_geo_point(geom: &Geometry) -> Result<Point> {
    match geom {
        Geometry::Point { coordinates } => Ok(Point::new(coordinates[0], coordinates[1])),
        other => Err(CatalogError::InvalidGeometry {
            reason: format!("expected Point, got {:?}", variant_name(other)),
        }),
    }
}

/// Convert a canonical MultiPolygon geometry to a geo::MultiPolygon.
pub fn to_geo_multi_polygon(geom: &Geometry) -> Result<MultiPolygon> {
    match geom {
        Geometry::MultiPolygon { coordinates } => {
            let polygons: Vec<Polygon> = coordinates
                .iter()
                .map(|poly| {
                    let mut rings = poly.iter().map(|ring| {
                        LineString::new(
                            ring.iter().map(|c| geo::Coord { x: c[0], y: c[1] }).collect(),
                        )
                    });
                    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
                    Polygon::new(exterior, rings.collect())
                })
                .collect();
            Ok(MultiPolygon::new(polygons))
        }
        other => Err(CatalogError::InvalidGeometry {
            reason: format!("expected MultiPolygon, got {:?}", variant_name(other)),
        }),
    }
}

/// Convert a geo::MultiPolygon back to the canonical representation.
pub fn from_geo_multi_polygon(mp: &MultiPolygon) -> Geometry {
    let coordinates = mp
        .iter()
        .map(|poly| {
            let mut rings = Vec::with_capacity(1 + poly.interiors().len());
            rings.push(ring_coords(poly.exterior()));
            for interior in poly.interiors() {
                rings.push(ring_coords(interior));
            }
            rings
        })
        .collect();
    Geometry::MultiPolygon { coordinates }
}

fn ring_coords(ring: &LineString) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// Parse a GeoJSON string into a canonical MultiPolygon boundary.
///
/// Accepts a bare geometry, a feature, or a single-feature collection, and
/// promotes a `Polygon` to a one-member `MultiPolygon`.
pub fn parse_geojson_boundary(geojson_str: &str) -> Result<Geometry> {
    let geojson: geojson::GeoJson = geojson_str.parse().map_err(|e| {
        CatalogError::InvalidGeometry { reason: format!("not valid GeoJSON: {}", e) }
    })?;

    let geometry = match geojson {
        geojson::GeoJson::Geometry(g) => g,
        geojson::GeoJson::Feature(f) => f.geometry.ok_or_else(|| CatalogError::InvalidGeometry {
            reason: "feature has no geometry".to_string(),
        })?,
        geojson::GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .next()
            .and_then(|f| f.geometry)
            .ok_or_else(|| CatalogError::InvalidGeometry {
                reason: "feature collection has no geometry".to_string(),
            })?,
    };

    let geo_geom: geo::Geometry = geometry.try_into().map_err(|e| {
        CatalogError::InvalidGeometry { reason: format!("unsupported geometry: {}", e) }
    })?;

    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Ok(from_geo_multi_polygon(&mp)),
        geo::Geometry::Polygon(p) => Ok(from_geo_multi_polygon(&MultiPolygon(vec![p]))),
        _ => Err(CatalogError::InvalidGeometry {
            reason: "boundary must be a Polygon or MultiPolygon".to_string(),
        }),
    }
}

fn variant_name(geom: &Geometry) -> &'static str {
    match geom {
        Geometry::Point { .. } => "Point",
        Geometry::MultiPolygon { .. } => "MultiPolygon",
    }
}
