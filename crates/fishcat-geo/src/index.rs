//! In-memory R-tree index over digitized management-unit boundaries.
//!
//! Built from the current registry, then queried per sample save: the
//! envelope lookup narrows the candidates and the exact `Contains` check
//! decides membership. Units without a digitized boundary are never indexed
//! and so never match.

use fishcat_core::models::{Geometry, UnitId};
use fishcat_core::Result;
use geo::{BoundingRect, Contains, MultiPolygon, Point};
use rstar::{RTree, RTreeObject, AABB};

use crate::convert::to_geo_multi_polygon;

/// A unit boundary stored in the R-tree with its id.
struct BoundaryEntry {
    unit_id: UnitId,
    envelope: AABB<[f64; 2]>,
    boundary: MultiPolygon,
}

impl RTreeObject for BoundaryEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over management-unit boundaries.
pub struct BoundaryIndex {
    tree: RTree<BoundaryEntry>,
}

impl BoundaryIndex {
    /// Build the index from `(unit id, optional boundary)` pairs.
    ///
    /// Units without a boundary are skipped.
    pub fn build<'a, I>(units: I) -> Result<Self>
    where
        I: IntoIterator<Item = (UnitId, Option<&'a Geometry>)>,
    {
        let mut entries = Vec::new();
        for (unit_id, boundary) in units {
            let Some(geom) = boundary else {
                continue;
            };
            let boundary = to_geo_multi_polygon(geom)?;
            entries.push(BoundaryEntry {
                unit_id,
                envelope: compute_envelope(&boundary),
                boundary,
            });
        }
        Ok(Self { tree: RTree::bulk_load(entries) })
    }

    /// All units whose boundary contains the point `(lon, lat)`.
    pub fn containing(&self, lon: f64, lat: f64) -> Vec<UnitId> {
        let point = Point::new(lon, lat);
        let query_env = AABB::from_point([lon, lat]);

        let mut units: Vec<UnitId> = self
            .tree
            .locate_in_envelope_intersecting(&query_env)
            .filter(|entry| entry.boundary.contains(&point))
            .map(|entry| entry.unit_id)
            .collect();
        units.sort();
        units
    }

    /// Number of indexed boundaries.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

fn compute_envelope(mp: &MultiPolygon) -> AABB<[f64; 2]> {
    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_boundary(min: f64, max: f64) -> Geometry {
        Geometry::multi_polygon(vec![vec![vec![
            [min, min],
            [max, min],
            [max, max],
            [min, max],
            [min, min],
        ]]])
    }

    #[test]
    fn test_index_skips_units_without_boundary() {
        let quota = square_boundary(0.0, 10.0);
        let index = BoundaryIndex::build(vec![
            (UnitId(1), Some(&quota)),
            (UnitId(2), None),
        ])
        .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.containing(5.0, 5.0), vec![UnitId(1)]);
    }

    #[test]
    fn test_containing_returns_all_overlapping_units() {
        let quota = square_boundary(0.0, 10.0);
        let assessment = square_boundary(3.0, 12.0);
        let distant = square_boundary(100.0, 110.0);
        let index = BoundaryIndex::build(vec![
            (UnitId(1), Some(&quota)),
            (UnitId(2), Some(&assessment)),
            (UnitId(3), Some(&distant)),
        ])
        .unwrap();
        assert_eq!(index.containing(5.0, 5.0), vec![UnitId(1), UnitId(2)]);
    }

    #[test]
    fn test_point_outside_every_boundary() {
        let quota = square_boundary(0.0, 10.0);
        let index = BoundaryIndex::build(vec![(UnitId(1), Some(&quota))]).unwrap();
        assert!(index.containing(-50.0, -50.0).is_empty());
    }

    #[test]
    fn test_envelope_hit_but_exact_miss() {
        // An L-shaped region: the point is inside the bounding box but
        // outside the polygon itself.
        let ell = Geometry::multi_polygon(vec![vec![vec![
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 2.0],
            [2.0, 2.0],
            [2.0, 10.0],
            [0.0, 10.0],
            [0.0, 0.0],
        ]]]);
        let index = BoundaryIndex::build(vec![(UnitId(1), Some(&ell))]).unwrap();
        assert!(index.containing(8.0, 8.0).is_empty());
        assert_eq!(index.containing(1.0, 1.0), vec![UnitId(1)]);
    }

    #[test]
    fn test_empty_index() {
        let index = BoundaryIndex::build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.containing(0.0, 0.0).is_empty());
    }

    proptest::proptest! {
        /// The envelope pre-filter must never change the answer: for any
        /// point and any set of square boundaries, the index agrees with a
        /// linear scan over the same `Contains` predicate.
        #[test]
        fn index_agrees_with_linear_scan(
            lon in -180.0f64..180.0,
            lat in -90.0f64..90.0,
            squares in proptest::collection::vec((-180.0f64..160.0, 0.5f64..20.0), 0..10),
        ) {
            let boundaries: Vec<(UnitId, Geometry)> = squares
                .iter()
                .enumerate()
                .map(|(i, (min, side))| {
                    (UnitId(i as i64 + 1), square_boundary(*min, min + side))
                })
                .collect();
            let index =
                BoundaryIndex::build(boundaries.iter().map(|(id, g)| (*id, Some(g)))).unwrap();

            let candidates: Vec<(UnitId, MultiPolygon)> = boundaries
                .iter()
                .map(|(id, g)| (*id, to_geo_multi_polygon(g).unwrap()))
                .collect();
            let mut expected =
                crate::containment::containing_units(Point::new(lon, lat), &candidates);
            expected.sort();

            proptest::prop_assert_eq!(index.containing(lon, lat), expected);
        }
    }
}
