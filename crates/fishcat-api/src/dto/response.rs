//! List serializations. Boundary geometry is deliberately absent from every
//! response type here; the API never serves polygon coordinates.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use fishcat_core::models::{Fn011, ManagementUnit, ManagementUnitType, UnitRef};
use fishcat_store::ports::SampleRecord;

/// Management unit type response
#[derive(Debug, Serialize)]
pub struct UnitTypeResponse {
    pub id: i64,
    pub label: String,
    pub abbrev: String,
    pub description: String,
}

impl From<ManagementUnitType> for UnitTypeResponse {
    fn from(mu_type: ManagementUnitType) -> Self {
        Self {
            id: mu_type.id.0,
            label: mu_type.label,
            abbrev: mu_type.abbrev,
            description: mu_type.description,
        }
    }
}

/// Management unit response, without its boundary
#[derive(Debug, Serialize)]
pub struct UnitResponse {
    pub id: i64,
    pub label: String,
    pub slug: String,
    pub description: String,
    pub lake_id: i64,
    pub mu_type_id: i64,
    pub primary: bool,
}

impl From<ManagementUnit> for UnitResponse {
    fn from(unit: ManagementUnit) -> Self {
        Self {
            id: unit.id.0,
            label: unit.label,
            slug: unit.slug,
            description: unit.description,
            lake_id: unit.lake_id.0,
            mu_type_id: unit.mu_type_id.0,
            primary: unit.primary,
        }
    }
}

/// FN011 project response
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub lake_id: i64,
    pub year: String,
    pub prj_cd: String,
    pub slug: String,
    pub prj_nm: String,
    pub prj_date0: NaiveDate,
    pub prj_date1: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment0: Option<String>,
}

impl From<Fn011> for ProjectResponse {
    fn from(project: Fn011) -> Self {
        Self {
            id: project.id.0,
            lake_id: project.lake_id.0,
            year: project.year,
            prj_cd: project.prj_cd,
            slug: project.slug,
            prj_nm: project.prj_nm,
            prj_date0: project.prj_date0,
            prj_date1: project.prj_date1,
            comment0: project.comment0,
        }
    }
}

/// Attached management unit on a sample row
#[derive(Debug, Serialize)]
pub struct UnitRefResponse {
    pub id: i64,
    pub label: String,
    pub slug: String,
}

impl From<UnitRef> for UnitRefResponse {
    fn from(unit: UnitRef) -> Self {
        Self {
            id: unit.id.0,
            label: unit.label,
            slug: unit.slug,
        }
    }
}

/// FN121 sample response with its attached unit labels
#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub id: i64,
    pub project_id: i64,
    pub sam: String,
    pub slug: String,
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
    pub dd_lat: Option<f64>,
    pub dd_lon: Option<f64>,
    pub comment1: Option<String>,
    pub management_units: Vec<UnitRefResponse>,
}

impl From<SampleRecord> for SampleResponse {
    fn from(record: SampleRecord) -> Self {
        let sample = record.sample;
        Self {
            id: sample.id.0,
            project_id: sample.project_id.0,
            sam: sample.sam,
            slug: sample.slug,
            grtp: sample.grtp,
            gr: sample.gr,
            effdt0: sample.effdt0,
            effdt1: sample.effdt1,
            effdur: sample.effdur,
            efftm0: sample.efftm0,
            efftm1: sample.efftm1,
            effst: sample.effst,
            orient: sample.orient,
            sidep: sample.sidep,
            secchi: sample.secchi,
            site: sample.site,
            sitem: sample.sitem,
            dd_lat: sample.dd_lat,
            dd_lon: sample.dd_lon,
            comment1: sample.comment1,
            management_units: record.mu.into_iter().map(UnitRefResponse::from).collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "fishcat-api" }
    }
}
