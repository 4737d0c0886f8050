//! The containment resolver.
//!
//! A pure function from a sample point and the candidate boundaries to the
//! set of management units containing that point. Persistence is layered on
//! top by the stores: each sample save calls this (or the equivalent
//! database-side predicate) and replaces the association with exactly the
//! result set.

use fishcat_core::models::UnitId;
use geo::{Contains, MultiPolygon, Point};

/// Return the ids of every unit whose boundary contains the point.
///
/// Overlapping boundaries are expected: a point can fall in several zone
/// types at once, and every match is returned. An empty result is a valid
/// outcome, not an error.
pub fn containing_units(point: Point, candidates: &[(UnitId, MultiPolygon)]) -> Vec<UnitId> {
    candidates
        .iter()
        .filter(|(_, boundary)| boundary.contains(&point))
        .map(|(id, _)| *id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> MultiPolygon {
        MultiPolygon(vec![geo::Polygon::new(
            geo::LineString::from(vec![(min, min), (max, min), (max, max), (min, max), (min, min)]),
            vec![],
        )])
    }

    #[test]
    fn test_point_inside_single_unit() {
        let candidates = vec![(UnitId(1), square(0.0, 10.0))];
        let result = containing_units(Point::new(5.0, 5.0), &candidates);
        assert_eq!(result, vec![UnitId(1)]);
    }

    #[test]
    fn test_point_in_overlapping_units() {
        // Overlapping quota zone and assessment area both contain the point.
        let candidates = vec![
            (UnitId(1), square(0.0, 10.0)),
            (UnitId(2), square(3.0, 12.0)),
            (UnitId(3), square(20.0, 30.0)),
        ];
        let result = containing_units(Point::new(5.0, 5.0), &candidates);
        assert_eq!(result, vec![UnitId(1), UnitId(2)]);
    }

    #[test]
    fn test_point_outside_all_units_is_empty() {
        let candidates = vec![(UnitId(1), square(0.0, 10.0))];
        let result = containing_units(Point::new(50.0, 50.0), &candidates);
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_candidates_is_empty() {
        assert!(containing_units(Point::new(0.0, 0.0), &[]).is_empty());
    }

    #[test]
    fn test_resolver_is_pure() {
        let candidates = vec![(UnitId(1), square(0.0, 10.0)), (UnitId(2), square(5.0, 15.0))];
        let point = Point::new(7.0, 7.0);
        assert_eq!(containing_units(point, &candidates), containing_units(point, &candidates));
    }
}
