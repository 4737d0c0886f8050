use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lake::LakeId;

/// Unique identifier for an FN011 project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub i64);

/// FN011 - project meta data.
///
/// A fishing project is identified by its unique 13-character project code
/// and owns a date range and many FN121 samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fn011 {
    pub id: ProjectId,
    pub lake_id: LakeId,

    /// Four-character project year, e.g. "2015"
    pub year: String,

    /// Unique 13-character project code, e.g. "LHA_IA12_123"
    pub prj_cd: String,

    /// Derived key, recomputed on every save from the project code.
    pub slug: String,

    pub prj_nm: String,
    pub prj_date0: NaiveDate,
    pub prj_date1: NaiveDate,

    pub comment0: Option<String>,
}

impl Fn011 {
    /// Maximum `prj_cd` length, matching the `fn011.prj_cd` column width.
    pub const PRJ_CD_MAX: usize = 13;

    /// The fish-net II key fields for this record.
    pub fn fishnet_keys(&self) -> String {
        self.prj_cd.clone()
    }
}

impl std::fmt::Display for Fn011 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.prj_nm, self.prj_cd)
    }
}
