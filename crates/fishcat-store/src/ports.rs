use async_trait::async_trait;
use fishcat_core::error::Result;
use fishcat_core::models::{
    Fn011, Fn121, Lake, LakeId, ManagementUnit, ManagementUnitType, ProjectId, SampleId, UnitId,
    UnitRef, UnitTypeId,
};

/// Narrowing criteria for management-unit listings (admin surface).
#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    /// Restrict to units of a lake, by lake abbreviation.
    pub lake: Option<String>,
    /// Restrict to units of a type, by type abbreviation.
    pub mu_type: Option<String>,
    /// Case-insensitive label substring search.
    pub search: Option<String>,
}

/// Query parameters for sample listings.
#[derive(Debug, Clone)]
pub struct SampleQuery {
    /// Unit-type abbreviation used to narrow each sample's attached unit
    /// list; absent, units flagged primary are attached instead.
    pub mu_type: Option<String>,
    /// Project year to match.
    pub year: String,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl Default for SampleQuery {
    fn default() -> Self {
        Self {
            mu_type: None,
            year: "2010".to_string(),
            page: 1,
            page_size: 1000,
        }
    }
}

/// A sample with its attached management-unit labels, one unit-type
/// dimension at a time. Boundary geometry is never carried here.
#[derive(Debug, Clone)]
pub struct SampleRecord {
    pub sample: Fn121,
    pub mu: Vec<UnitRef>,
}

/// One page of a sample listing.
#[derive(Debug, Clone)]
pub struct SamplePage {
    /// Total matching samples across all pages.
    pub count: u64,
    pub results: Vec<SampleRecord>,
}

/// Port for the lake and management-unit registries.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Store a new lake. Fails with a uniqueness violation if the
    /// abbreviation or name already exists.
    async fn create_lake(&self, lake: &Lake) -> Result<Lake>;

    async fn get_lake(&self, id: LakeId) -> Result<Option<Lake>>;

    async fn lake_by_abbrev(&self, abbrev: &str) -> Result<Option<Lake>>;

    /// All lakes, ordered by abbreviation.
    async fn list_lakes(&self) -> Result<Vec<Lake>>;

    /// Store a new unit type. The abbreviation is slugified once here and
    /// never recomputed on later saves.
    async fn create_unit_type(&self, mu_type: &ManagementUnitType) -> Result<ManagementUnitType>;

    async fn get_unit_type(&self, id: UnitTypeId) -> Result<Option<ManagementUnitType>>;

    async fn unit_type_by_abbrev(&self, abbrev: &str) -> Result<Option<ManagementUnitType>>;

    async fn list_unit_types(&self) -> Result<Vec<ManagementUnitType>>;

    /// Store a new management unit. The slug is derived from the owning lake
    /// and unit type; a collision fails the save.
    async fn create_unit(&self, unit: &ManagementUnit) -> Result<ManagementUnit>;

    /// Update an existing unit, rederiving its slug.
    async fn update_unit(&self, unit: &ManagementUnit) -> Result<ManagementUnit>;

    async fn delete_unit(&self, id: UnitId) -> Result<()>;

    async fn get_unit(&self, id: UnitId) -> Result<Option<ManagementUnit>>;

    async fn unit_by_slug(&self, slug: &str) -> Result<Option<ManagementUnit>>;

    /// Units matching the filter, ordered by lake abbreviation, type and
    /// label.
    async fn list_units(&self, filter: &UnitFilter) -> Result<Vec<ManagementUnit>>;
}

/// Port for FN011 project records.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Store a new project, deriving its slug from the project code.
    async fn create_project(&self, project: &Fn011) -> Result<Fn011>;

    async fn get_project(&self, id: ProjectId) -> Result<Option<Fn011>>;

    async fn project_by_code(&self, prj_cd: &str) -> Result<Option<Fn011>>;

    /// All projects, most recent year first.
    async fn list_projects(&self) -> Result<Vec<Fn011>>;
}

/// Port for FN121 sample records.
///
/// Every save validates the coordinate pair, rebuilds the point geometry,
/// and replaces the management-unit association with exactly the set of
/// units containing the point. The row write and the association replace
/// are atomic.
#[async_trait]
pub trait SampleStore: Send + Sync {
    async fn create_sample(&self, sample: &Fn121) -> Result<Fn121>;

    async fn update_sample(&self, sample: &Fn121) -> Result<Fn121>;

    async fn get_sample(&self, id: SampleId) -> Result<Option<Fn121>>;

    /// One page of samples for a project year, each with its attached unit
    /// labels per the query's `mu_type` (or the primary units by default).
    async fn list_samples(&self, query: &SampleQuery) -> Result<SamplePage>;
}
