use serde::{Deserialize, Serialize};

use super::geometry::Geometry;
use super::lake::{Lake, LakeId};
use crate::slug::unit_slug;

/// Unique identifier for a management unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitTypeId(pub i64);

/// Unique identifier for a management unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub i64);

/// A category of management unit - quota management areas, assessment areas,
/// statistical districts, lake trout rehabilitation zones.
///
/// The abbreviation is slugified once from the short code supplied at entry
/// and never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementUnitType {
    pub id: UnitTypeId,
    pub label: String,
    pub abbrev: String,
    pub description: String,
}

impl std::fmt::Display for ManagementUnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.abbrev)
    }
}

/// An administratively defined polygon zone within a lake.
///
/// Overlapping units of different types are expected - a sample point can
/// simultaneously fall in a quota zone, an assessment district, and a
/// rehabilitation zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementUnit {
    pub id: UnitId,
    pub label: String,

    /// Derived key, recomputed on every save from lake abbreviation,
    /// unit-type abbreviation and label.
    pub slug: String,

    pub description: String,

    /// Digitized zone boundary. Units without a boundary never match a
    /// containment lookup.
    pub boundary: Option<Geometry>,

    pub lake_id: LakeId,
    pub mu_type_id: UnitTypeId,

    /// Marks this unit as belonging to the primary unit type for its lake,
    /// used as the default when no explicit type filter is given.
    pub primary: bool,
}

impl ManagementUnit {
    /// Recompute the derived slug from the owning lake and unit type.
    pub fn derive_slug(&self, lake: &Lake, mu_type: &ManagementUnitType) -> String {
        unit_slug(&lake.abbrev, &mu_type.abbrev, &self.label)
    }

    /// Full display name: lake, upper-cased type abbreviation and label.
    pub fn name(&self, lake: &Lake, mu_type: &ManagementUnitType) -> String {
        format!("{} {} {}", lake, mu_type.abbrev.to_uppercase(), self.label)
    }
}

/// Geometry-free projection of a management unit, used wherever the boundary
/// is not needed and too expensive to carry (sample listings, associations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    pub id: UnitId,
    pub label: String,
    pub slug: String,
}

impl From<&ManagementUnit> for UnitRef {
    fn from(unit: &ManagementUnit) -> Self {
        Self {
            id: unit.id,
            label: unit.label.clone(),
            slug: unit.slug.clone(),
        }
    }
}
