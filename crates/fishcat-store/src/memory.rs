//! In-memory storage implementation for development and testing.
//!
//! All tables live behind one `RwLock`, so every save is atomic: the sample
//! row and its recomputed management-unit association become visible
//! together or not at all. `RwLock::unwrap()` is intentional - lock
//! poisoning only occurs when another thread panicked while holding the
//! lock, which is an unrecoverable state. For production workloads, use the
//! PostgreSQL backend.

use async_trait::async_trait;
use fishcat_core::error::{CatalogError, Result};
use fishcat_core::models::{
    Fn011, Fn121, Geometry, Lake, LakeId, ManagementUnit, ManagementUnitType, ProjectId, SampleId,
    UnitId, UnitRef, UnitTypeId,
};
use fishcat_core::slug::{project_slug, sample_slug, slugify};
use fishcat_geo::BoundaryIndex;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{
    ProjectStore, RegistryStore, SamplePage, SampleQuery, SampleRecord, SampleStore, UnitFilter,
};

#[derive(Debug, Default)]
struct Inner {
    lakes: HashMap<LakeId, Lake>,
    unit_types: HashMap<UnitTypeId, ManagementUnitType>,
    units: HashMap<UnitId, ManagementUnit>,
    projects: HashMap<ProjectId, Fn011>,
    samples: HashMap<SampleId, Fn121>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn unit_sort_key(&self, unit: &ManagementUnit) -> (String, UnitTypeId, String) {
        let lake_abbrev = self
            .lakes
            .get(&unit.lake_id)
            .map(|l| l.abbrev.clone())
            .unwrap_or_default();
        (lake_abbrev, unit.mu_type_id, unit.label.clone())
    }
}

/// In-memory implementation of all three storage ports.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared save path for create and update: validate the coordinate
    /// pair, rebuild slug and geometry, resolve containment, and replace
    /// the row under one write lock.
    fn save_sample(&self, sample: &Fn121, existing: Option<SampleId>) -> Result<Fn121> {
        let mut inner = self.inner.write().unwrap();

        let project = inner
            .projects
            .get(&sample.project_id)
            .ok_or_else(|| CatalogError::not_found("project", sample.project_id.0.to_string()))?
            .clone();

        let dd_lon = sample
            .dd_lon
            .ok_or_else(|| CatalogError::field_required("dd_lon"))?;
        let dd_lat = sample
            .dd_lat
            .ok_or_else(|| CatalogError::field_required("dd_lat"))?;
        if sample.sam.chars().count() > Fn121::SAM_MAX {
            return Err(CatalogError::field_too_long("sam", Fn121::SAM_MAX));
        }

        let slug = sample_slug(&project.prj_cd, &sample.sam);

        let duplicate = inner.samples.values().any(|s| {
            Some(s.id) != existing && s.project_id == sample.project_id && s.sam == sample.sam
        });
        if duplicate {
            return Err(CatalogError::duplicate("sample", slug));
        }

        let index = BoundaryIndex::build(
            inner.units.values().map(|u| (u.id, u.boundary.as_ref())),
        )?;
        let management_units = index.containing(dd_lon, dd_lat);

        let id = match existing {
            Some(id) => id,
            None => SampleId(inner.next_id()),
        };

        let saved = Fn121 {
            id,
            slug,
            geom: Some(Geometry::point(dd_lon, dd_lat)),
            management_units,
            ..sample.clone()
        };

        inner.samples.insert(id, saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn create_lake(&self, lake: &Lake) -> Result<Lake> {
        let mut inner = self.inner.write().unwrap();

        if inner.lakes.values().any(|l| l.abbrev == lake.abbrev) {
            return Err(CatalogError::duplicate("lake", &lake.abbrev));
        }
        if inner.lakes.values().any(|l| l.lake_name == lake.lake_name) {
            return Err(CatalogError::duplicate("lake", &lake.lake_name));
        }

        let mut saved = lake.clone();
        saved.id = LakeId(inner.next_id());
        inner.lakes.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn get_lake(&self, id: LakeId) -> Result<Option<Lake>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.lakes.get(&id).cloned())
    }

    async fn lake_by_abbrev(&self, abbrev: &str) -> Result<Option<Lake>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.lakes.values().find(|l| l.abbrev == abbrev).cloned())
    }

    async fn list_lakes(&self) -> Result<Vec<Lake>> {
        let inner = self.inner.read().unwrap();
        let mut lakes: Vec<Lake> = inner.lakes.values().cloned().collect();
        lakes.sort_by(|a, b| a.abbrev.cmp(&b.abbrev));
        Ok(lakes)
    }

    async fn create_unit_type(&self, mu_type: &ManagementUnitType) -> Result<ManagementUnitType> {
        let mut inner = self.inner.write().unwrap();

        // Derived once at creation, never recomputed on later saves.
        let abbrev = slugify(&mu_type.abbrev);
        if abbrev.is_empty() {
            return Err(CatalogError::field_required("abbrev"));
        }
        if inner.unit_types.values().any(|t| t.abbrev == abbrev) {
            return Err(CatalogError::duplicate("management unit type", &abbrev));
        }

        let mut saved = mu_type.clone();
        saved.id = UnitTypeId(inner.next_id());
        saved.abbrev = abbrev;
        inner.unit_types.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn get_unit_type(&self, id: UnitTypeId) -> Result<Option<ManagementUnitType>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.unit_types.get(&id).cloned())
    }

    async fn unit_type_by_abbrev(&self, abbrev: &str) -> Result<Option<ManagementUnitType>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.unit_types.values().find(|t| t.abbrev == abbrev).cloned())
    }

    async fn list_unit_types(&self) -> Result<Vec<ManagementUnitType>> {
        let inner = self.inner.read().unwrap();
        let mut types: Vec<ManagementUnitType> = inner.unit_types.values().cloned().collect();
        types.sort_by(|a, b| a.abbrev.cmp(&b.abbrev));
        Ok(types)
    }

    async fn create_unit(&self, unit: &ManagementUnit) -> Result<ManagementUnit> {
        let mut inner = self.inner.write().unwrap();
        let saved = save_unit(&mut inner, unit, None)?;
        Ok(saved)
    }

    async fn update_unit(&self, unit: &ManagementUnit) -> Result<ManagementUnit> {
        let mut inner = self.inner.write().unwrap();
        if !inner.units.contains_key(&unit.id) {
            return Err(CatalogError::not_found("management unit", unit.id.0.to_string()));
        }
        let saved = save_unit(&mut inner, unit, Some(unit.id))?;
        Ok(saved)
    }

    async fn delete_unit(&self, id: UnitId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.units.remove(&id).is_none() {
            return Err(CatalogError::not_found("management unit", id.0.to_string()));
        }
        // The association is a derived cache; drop the deleted unit from it.
        for sample in inner.samples.values_mut() {
            sample.management_units.retain(|unit_id| *unit_id != id);
        }
        Ok(())
    }

    async fn get_unit(&self, id: UnitId) -> Result<Option<ManagementUnit>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.units.get(&id).cloned())
    }

    async fn unit_by_slug(&self, slug: &str) -> Result<Option<ManagementUnit>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.units.values().find(|u| u.slug == slug).cloned())
    }

    async fn list_units(&self, filter: &UnitFilter) -> Result<Vec<ManagementUnit>> {
        let inner = self.inner.read().unwrap();

        let mut units: Vec<ManagementUnit> = inner
            .units
            .values()
            .filter(|unit| {
                if let Some(ref lake) = filter.lake {
                    let matches = inner
                        .lakes
                        .get(&unit.lake_id)
                        .is_some_and(|l| l.abbrev == *lake);
                    if !matches {
                        return false;
                    }
                }
                if let Some(ref mu_type) = filter.mu_type {
                    let matches = inner
                        .unit_types
                        .get(&unit.mu_type_id)
                        .is_some_and(|t| t.abbrev == *mu_type);
                    if !matches {
                        return false;
                    }
                }
                if let Some(ref search) = filter.search {
                    if !unit.label.to_lowercase().contains(&search.to_lowercase()) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        units.sort_by_key(|u| inner.unit_sort_key(u));
        Ok(units)
    }
}

/// Derive the slug, enforce uniqueness, and insert the unit row.
fn save_unit(
    inner: &mut Inner,
    unit: &ManagementUnit,
    existing: Option<UnitId>,
) -> Result<ManagementUnit> {
    let lake = inner
        .lakes
        .get(&unit.lake_id)
        .ok_or_else(|| CatalogError::not_found("lake", unit.lake_id.0.to_string()))?;
    let mu_type = inner
        .unit_types
        .get(&unit.mu_type_id)
        .ok_or_else(|| CatalogError::not_found("management unit type", unit.mu_type_id.0.to_string()))?;

    let slug = unit.derive_slug(lake, mu_type);

    let collision = inner
        .units
        .values()
        .any(|u| Some(u.id) != existing && u.slug == slug);
    if collision {
        return Err(CatalogError::duplicate("management unit", slug));
    }

    let id = match existing {
        Some(id) => id,
        None => UnitId(inner.next_id()),
    };

    let mut saved = unit.clone();
    saved.id = id;
    saved.slug = slug;
    inner.units.insert(id, saved.clone());
    Ok(saved)
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, project: &Fn011) -> Result<Fn011> {
        let mut inner = self.inner.write().unwrap();

        if project.prj_cd.chars().count() > Fn011::PRJ_CD_MAX {
            return Err(CatalogError::field_too_long("prj_cd", Fn011::PRJ_CD_MAX));
        }
        if !inner.lakes.contains_key(&project.lake_id) {
            return Err(CatalogError::not_found("lake", project.lake_id.0.to_string()));
        }
        if inner.projects.values().any(|p| p.prj_cd == project.prj_cd) {
            return Err(CatalogError::duplicate("project", &project.prj_cd));
        }

        let mut saved = project.clone();
        saved.id = ProjectId(inner.next_id());
        saved.slug = project_slug(&project.prj_cd);
        inner.projects.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<Fn011>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.projects.get(&id).cloned())
    }

    async fn project_by_code(&self, prj_cd: &str) -> Result<Option<Fn011>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.projects.values().find(|p| p.prj_cd == prj_cd).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Fn011>> {
        let inner = self.inner.read().unwrap();
        let mut projects: Vec<Fn011> = inner.projects.values().cloned().collect();
        projects.sort_by(|a, b| {
            b.year
                .cmp(&a.year)
                .then_with(|| b.prj_date1.cmp(&a.prj_date1))
        });
        Ok(projects)
    }
}

#[async_trait]
impl SampleStore for MemoryStore {
    async fn create_sample(&self, sample: &Fn121) -> Result<Fn121> {
        self.save_sample(sample, None)
    }

    async fn update_sample(&self, sample: &Fn121) -> Result<Fn121> {
        {
            let inner = self.inner.read().unwrap();
            if !inner.samples.contains_key(&sample.id) {
                return Err(CatalogError::not_found("sample", sample.id.0.to_string()));
            }
        }
        self.save_sample(sample, Some(sample.id))
    }

    async fn get_sample(&self, id: SampleId) -> Result<Option<Fn121>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.samples.get(&id).cloned())
    }

    async fn list_samples(&self, query: &SampleQuery) -> Result<SamplePage> {
        let inner = self.inner.read().unwrap();

        let mut matching: Vec<&Fn121> = inner
            .samples
            .values()
            .filter(|s| {
                inner
                    .projects
                    .get(&s.project_id)
                    .is_some_and(|p| p.year == query.year)
            })
            .collect();
        matching.sort_by(|a, b| a.project_id.cmp(&b.project_id).then_with(|| a.sam.cmp(&b.sam)));

        let count = matching.len() as u64;
        let offset = (query.page.saturating_sub(1) as usize) * query.page_size as usize;

        let results = matching
            .into_iter()
            .skip(offset)
            .take(query.page_size as usize)
            .map(|sample| {
                // The prefetch dimension: only units of the requested type,
                // or the primary units when no type is given.
                let mut mu: Vec<UnitRef> = sample
                    .management_units
                    .iter()
                    .filter_map(|unit_id| inner.units.get(unit_id))
                    .filter(|unit| match query.mu_type {
                        Some(ref abbrev) => inner
                            .unit_types
                            .get(&unit.mu_type_id)
                            .is_some_and(|t| t.abbrev == *abbrev),
                        None => unit.primary,
                    })
                    .map(UnitRef::from)
                    .collect();
                mu.sort_by(|a, b| a.slug.cmp(&b.slug));

                SampleRecord { sample: sample.clone(), mu }
            })
            .collect();

        Ok(SamplePage { count, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lake_fixture() -> Lake {
        Lake {
            id: LakeId(0),
            abbrev: "HU".to_string(),
            lake_name: "Lake Huron".to_string(),
            boundary: None,
        }
    }

    fn unit_type_fixture(abbrev: &str, label: &str) -> ManagementUnitType {
        ManagementUnitType {
            id: UnitTypeId(0),
            label: label.to_string(),
            abbrev: abbrev.to_string(),
            description: String::new(),
        }
    }

    fn unit_fixture(
        label: &str,
        lake_id: LakeId,
        mu_type_id: UnitTypeId,
        primary: bool,
        boundary: Option<Geometry>,
    ) -> ManagementUnit {
        ManagementUnit {
            id: UnitId(0),
            label: label.to_string(),
            slug: String::new(),
            description: String::new(),
            boundary,
            lake_id,
            mu_type_id,
            primary,
        }
    }

    fn project_fixture(prj_cd: &str, year: &str, lake_id: LakeId) -> Fn011 {
        Fn011 {
            id: ProjectId(0),
            lake_id,
            year: year.to_string(),
            prj_cd: prj_cd.to_string(),
            slug: String::new(),
            prj_nm: "Index Netting".to_string(),
            prj_date0: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
            prj_date1: NaiveDate::from_ymd_opt(2015, 8, 31).unwrap(),
            comment0: None,
        }
    }

    fn sample_fixture(project_id: ProjectId, sam: &str, lon: f64, lat: f64) -> Fn121 {
        Fn121 {
            id: SampleId(0),
            project_id,
            sam: sam.to_string(),
            slug: String::new(),
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
            dd_lat: Some(lat),
            dd_lon: Some(lon),
            geom: None,
            comment1: None,
            management_units: Vec::new(),
        }
    }

    fn square_boundary(min: f64, max: f64) -> Geometry {
        Geometry::multi_polygon(vec![vec![vec![
            [min, min],
            [max, min],
            [max, max],
            [min, max],
            [min, min],
        ]]])
    }

    #[tokio::test]
    async fn test_unit_slug_derived_on_save() {
        let store = MemoryStore::new();
        let lake = store.create_lake(&lake_fixture()).await.unwrap();
        let qma = store
            .create_unit_type(&unit_type_fixture("qma", "Quota Management Area"))
            .await
            .unwrap();

        let unit = store
            .create_unit(&unit_fixture("MU 1", lake.id, qma.id, true, None))
            .await
            .unwrap();
        assert_eq!(unit.slug, "hu_qma_mu_1");
    }

    #[tokio::test]
    async fn test_unit_slug_collision_fails_save() {
        let store = MemoryStore::new();
        let lake = store.create_lake(&lake_fixture()).await.unwrap();
        let qma = store
            .create_unit_type(&unit_type_fixture("qma", "Quota Management Area"))
            .await
            .unwrap();

        store
            .create_unit(&unit_fixture("MU 1", lake.id, qma.id, true, None))
            .await
            .unwrap();
        let err = store
            .create_unit(&unit_fixture("MU 1", lake.id, qma.id, true, None))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_unit_slug_recomputed_on_update() {
        let store = MemoryStore::new();
        let lake = store.create_lake(&lake_fixture()).await.unwrap();
        let qma = store
            .create_unit_type(&unit_type_fixture("qma", "Quota Management Area"))
            .await
            .unwrap();

        let mut unit = store
            .create_unit(&unit_fixture("MU 1", lake.id, qma.id, true, None))
            .await
            .unwrap();
        unit.label = "MU 2".to_string();
        let updated = store.update_unit(&unit).await.unwrap();
        assert_eq!(updated.slug, "hu_qma_mu_2");
    }

    #[tokio::test]
    async fn test_unit_type_abbrev_slugified_once() {
        let store = MemoryStore::new();
        let created = store
            .create_unit_type(&unit_type_fixture("QMA", "Quota Management Area"))
            .await
            .unwrap();
        assert_eq!(created.abbrev, "qma");

        let err = store
            .create_unit_type(&unit_type_fixture("qma", "Another"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_project_slug_and_code_uniqueness() {
        let store = MemoryStore::new();
        let lake = store.create_lake(&lake_fixture()).await.unwrap();

        let project = store
            .create_project(&project_fixture("LHA_IA12_123", "2015", lake.id))
            .await
            .unwrap();
        assert_eq!(project.slug, "lha_ia12_123");

        let err = store
            .create_project(&project_fixture("LHA_IA12_123", "2016", lake.id))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_lake_abbrev_uniqueness() {
        let store = MemoryStore::new();
        store.create_lake(&lake_fixture()).await.unwrap();

        let mut other = lake_fixture();
        other.lake_name = "Lake Huron North".to_string();
        assert!(store.create_lake(&other).await.is_err());
    }

    /// Registry with two overlapping unit types over the origin square plus
    /// one distant unit, ready for containment tests.
    async fn containment_fixture(store: &MemoryStore) -> (Fn011, UnitId, UnitId, UnitId) {
        let lake = store.create_lake(&lake_fixture()).await.unwrap();
        let qma = store
            .create_unit_type(&unit_type_fixture("qma", "Quota Management Area"))
            .await
            .unwrap();
        let aa = store
            .create_unit_type(&unit_type_fixture("aa", "Assessment Area"))
            .await
            .unwrap();

        let quota = store
            .create_unit(&unit_fixture(
                "MU 1",
                lake.id,
                qma.id,
                true,
                Some(square_boundary(0.0, 10.0)),
            ))
            .await
            .unwrap();
        let assessment = store
            .create_unit(&unit_fixture(
                "AA 1",
                lake.id,
                aa.id,
                false,
                Some(square_boundary(3.0, 12.0)),
            ))
            .await
            .unwrap();
        let distant = store
            .create_unit(&unit_fixture(
                "MU 9",
                lake.id,
                qma.id,
                true,
                Some(square_boundary(100.0, 110.0)),
            ))
            .await
            .unwrap();

        let project = store
            .create_project(&project_fixture("LHA_IA15_001", "2015", lake.id))
            .await
            .unwrap();

        (project, quota.id, assessment.id, distant.id)
    }

    #[tokio::test]
    async fn test_sample_save_resolves_containment() {
        let store = MemoryStore::new();
        let (project, quota, assessment, _) = containment_fixture(&store).await;

        let sample = store
            .create_sample(&sample_fixture(project.id, "001", 5.0, 5.0))
            .await
            .unwrap();

        assert_eq!(sample.slug, "lha_ia15_001_001");
        assert_eq!(sample.geom, Some(Geometry::point(5.0, 5.0)));
        assert_eq!(sample.management_units, vec![quota, assessment]);
    }

    #[tokio::test]
    async fn test_sample_resave_is_idempotent() {
        let store = MemoryStore::new();
        let (project, _, _, _) = containment_fixture(&store).await;

        let first = store
            .create_sample(&sample_fixture(project.id, "001", 5.0, 5.0))
            .await
            .unwrap();
        let second = store.update_sample(&first).await.unwrap();

        assert_eq!(first.management_units, second.management_units);
        assert_eq!(first.slug, second.slug);
    }

    #[tokio::test]
    async fn test_moved_sample_swaps_association() {
        let store = MemoryStore::new();
        let (project, quota, assessment, distant) = containment_fixture(&store).await;

        let mut sample = store
            .create_sample(&sample_fixture(project.id, "001", 1.0, 1.0))
            .await
            .unwrap();
        assert_eq!(sample.management_units, vec![quota]);

        // Move the point into the distant unit only.
        sample.dd_lon = Some(105.0);
        sample.dd_lat = Some(105.0);
        let moved = store.update_sample(&sample).await.unwrap();

        assert_eq!(moved.management_units, vec![distant]);
        assert!(!moved.management_units.contains(&quota));
        assert!(!moved.management_units.contains(&assessment));
    }

    #[tokio::test]
    async fn test_sample_outside_all_boundaries_saves_empty() {
        let store = MemoryStore::new();
        let (project, _, _, _) = containment_fixture(&store).await;

        let sample = store
            .create_sample(&sample_fixture(project.id, "001", -50.0, -50.0))
            .await
            .unwrap();
        assert!(sample.management_units.is_empty());
    }

    #[tokio::test]
    async fn test_sample_without_coordinates_fails_before_resolver() {
        let store = MemoryStore::new();
        let (project, _, _, _) = containment_fixture(&store).await;

        let mut sample = sample_fixture(project.id, "001", 0.0, 0.0);
        sample.dd_lon = None;
        let err = store.create_sample(&sample).await.unwrap_err();
        assert!(matches!(err, CatalogError::FieldRequired { ref field } if field == "dd_lon"));
    }

    #[tokio::test]
    async fn test_sample_sam_over_five_chars_fails() {
        let store = MemoryStore::new();
        let (project, _, _, _) = containment_fixture(&store).await;

        let err = store
            .create_sample(&sample_fixture(project.id, "000001", 5.0, 5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::FieldTooLong { ref field, max: 5 } if field == "sam"));
    }

    #[tokio::test]
    async fn test_project_code_over_thirteen_chars_fails() {
        let store = MemoryStore::new();
        let lake = store.create_lake(&lake_fixture()).await.unwrap();

        let err = store
            .create_project(&project_fixture("LHA_IA12_12345", "2015", lake.id))
            .await
            .unwrap_err();
        assert!(
            matches!(err, CatalogError::FieldTooLong { ref field, max: 13 } if field == "prj_cd")
        );
    }

    #[tokio::test]
    async fn test_sample_key_uniqueness() {
        let store = MemoryStore::new();
        let (project, _, _, _) = containment_fixture(&store).await;

        store
            .create_sample(&sample_fixture(project.id, "001", 5.0, 5.0))
            .await
            .unwrap();
        let err = store
            .create_sample(&sample_fixture(project.id, "001", 6.0, 6.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_list_samples_filters_by_year_and_type() {
        let store = MemoryStore::new();
        let (project, quota, assessment, _) = containment_fixture(&store).await;

        store
            .create_sample(&sample_fixture(project.id, "001", 5.0, 5.0))
            .await
            .unwrap();

        // Default (no mu_type): only the primary quota unit is attached.
        let page = store
            .list_samples(&SampleQuery { year: "2015".to_string(), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].mu.len(), 1);
        assert_eq!(page.results[0].mu[0].id, quota);

        // Explicit type filter narrows to the assessment dimension.
        let page = store
            .list_samples(&SampleQuery {
                mu_type: Some("aa".to_string()),
                year: "2015".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.results[0].mu.len(), 1);
        assert_eq!(page.results[0].mu[0].id, assessment);

        // A different year matches nothing.
        let page = store
            .list_samples(&SampleQuery { year: "2010".to_string(), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn test_list_samples_unknown_type_attaches_nothing() {
        let store = MemoryStore::new();
        let (project, _, _, _) = containment_fixture(&store).await;

        store
            .create_sample(&sample_fixture(project.id, "001", 5.0, 5.0))
            .await
            .unwrap();

        let page = store
            .list_samples(&SampleQuery {
                mu_type: Some("ltrz".to_string()),
                year: "2015".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert!(page.results[0].mu.is_empty());
    }

    #[tokio::test]
    async fn test_list_samples_pagination() {
        let store = MemoryStore::new();
        let (project, _, _, _) = containment_fixture(&store).await;

        for sam in ["001", "002", "003"] {
            store
                .create_sample(&sample_fixture(project.id, sam, 5.0, 5.0))
                .await
                .unwrap();
        }

        let page = store
            .list_samples(&SampleQuery {
                year: "2015".to_string(),
                page: 2,
                page_size: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].sample.sam, "003");
    }

    #[tokio::test]
    async fn test_list_units_filters() {
        let store = MemoryStore::new();
        let (_, _, _, _) = containment_fixture(&store).await;

        let all = store.list_units(&UnitFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let quota_only = store
            .list_units(&UnitFilter { mu_type: Some("qma".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(quota_only.len(), 2);

        let searched = store
            .list_units(&UnitFilter { search: Some("mu 9".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].label, "MU 9");
    }

    #[tokio::test]
    async fn test_delete_unit_drops_derived_association() {
        let store = MemoryStore::new();
        let (project, quota, assessment, _) = containment_fixture(&store).await;

        let sample = store
            .create_sample(&sample_fixture(project.id, "001", 5.0, 5.0))
            .await
            .unwrap();
        assert!(sample.management_units.contains(&quota));

        store.delete_unit(quota).await.unwrap();
        let reloaded = store.get_sample(sample.id).await.unwrap().unwrap();
        assert_eq!(reloaded.management_units, vec![assessment]);
    }
}
