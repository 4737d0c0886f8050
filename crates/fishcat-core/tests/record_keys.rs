//! Derived keys across record types: fish-net II keys and the slugs
//! computed from them.

use chrono::NaiveDate;
use fishcat_core::models::{Fn011, Fn121, LakeId, ProjectId, SampleId};
use fishcat_core::slug::{project_slug, sample_slug, slugify};

fn project() -> Fn011 {
    Fn011 {
        id: ProjectId(1),
        lake_id: LakeId(1),
        year: "2015".to_string(),
        prj_cd: "LHA_IA12_123".to_string(),
        slug: project_slug("LHA_IA12_123"),
        prj_nm: "Offshore Index Netting".to_string(),
        prj_date0: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
        prj_date1: NaiveDate::from_ymd_opt(2015, 8, 31).unwrap(),
        comment0: None,
    }
}

fn sample(project: &Fn011, sam: &str) -> Fn121 {
    Fn121 {
        id: SampleId(1),
        project_id: project.id,
        sam: sam.to_string(),
        slug: sample_slug(&project.prj_cd, sam),
        grtp: None,
        gr: None,
        effdt0: None,
        effdt1: None,
        effdur: None,
        efftm0: None,
        efftm1: None,
        effst: None,
        orient: None,
        sidep: None,
        secchi: None,
        site: None,
        sitem: None,
        dd_lat: Some(44.75),
        dd_lon: Some(-81.5),
        geom: None,
        comment1: None,
        management_units: Vec::new(),
    }
}

#[test]
fn test_project_fishnet_key_is_project_code() {
    let project = project();
    assert_eq!(project.fishnet_keys(), "LHA_IA12_123");
    assert_eq!(project.slug, slugify(&project.fishnet_keys()));
}

#[test]
fn test_sample_fishnet_key_joins_code_and_sam() {
    let project = project();
    let sample = sample(&project, "001");
    assert_eq!(sample.fishnet_keys(&project.prj_cd), "LHA_IA12_123-001");
}

#[test]
fn test_sample_slug_is_slugified_fishnet_key() {
    let project = project();
    let sample = sample(&project, "001");
    assert_eq!(sample.slug, slugify(&sample.fishnet_keys(&project.prj_cd)));
    assert_eq!(sample.slug, "lha_ia12_123_001");
}

#[test]
fn test_sample_display_is_upper_slug() {
    let project = project();
    let sample = sample(&project, "001");
    assert_eq!(sample.to_string(), "LHA_IA12_123_001");
}
