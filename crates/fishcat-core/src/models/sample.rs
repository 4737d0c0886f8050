use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::geometry::Geometry;
use super::management_unit::UnitId;
use super::project::ProjectId;

/// Unique identifier for an FN121 sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleId(pub i64);

/// FN121 - a fishing event/effort.
///
/// Identified by the `(project, sam)` pair. The point geometry is derived
/// from `dd_lon`/`dd_lat` at save time, overwriting any prior value, and the
/// management-unit association is wholly recomputed from that point on every
/// save - it is a derived cache, never directly editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fn121 {
    pub id: SampleId,
    pub project_id: ProjectId,

    /// Sample number within the project, up to 5 characters
    pub sam: String,

    /// Derived key, recomputed on every save from `{prj_cd}-{sam}`.
    pub slug: String,

    // Gear and effort fields
    pub grtp: Option<String>,
    pub gr: Option<String>,
    pub effdt0: Option<NaiveDate>,
    pub effdt1: Option<NaiveDate>,
    pub effdur: Option<f64>,
    pub efftm0: Option<NaiveTime>,
    pub efftm1: Option<NaiveTime>,
    pub effst: Option<String>,
    pub orient: Option<String>,
    pub sidep: Option<f64>,
    pub secchi: Option<f64>,

    pub site: Option<String>,
    pub sitem: Option<String>,

    /// Latitude in decimal degrees. Required before the sample can be saved.
    pub dd_lat: Option<f64>,
    /// Longitude in decimal degrees. Required before the sample can be saved.
    pub dd_lon: Option<f64>,

    /// Point geometry as (longitude, latitude), set from the coordinate pair
    /// at save time.
    pub geom: Option<Geometry>,

    pub comment1: Option<String>,

    /// Management units whose boundary contains this sample's point.
    /// Recomputed on every save; empty when the point falls outside all
    /// digitized boundaries.
    pub management_units: Vec<UnitId>,
}

impl Fn121 {
    /// Maximum `sam` length, matching the `fn121.sam` column width.
    pub const SAM_MAX: usize = 5;

    /// The fish-net II key fields for this record: `{prj_cd}-{sam}`.
    pub fn fishnet_keys(&self, prj_cd: &str) -> String {
        format!("{}-{}", prj_cd, self.sam)
    }
}

impl std::fmt::Display for Fn121 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug.to_uppercase())
    }
}
