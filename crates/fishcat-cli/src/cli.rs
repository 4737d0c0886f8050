use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fishcat - fisheries geospatial data catalog
#[derive(Parser, Debug)]
#[command(name = "fishcat")]
#[command(about = "Fisheries geospatial data catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Storage backend to use (memory or postgres)
    #[arg(long, global = true, default_value = "postgres")]
    pub storage: StorageBackend,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage backend selection
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum StorageBackend {
    /// In-memory storage (development only; nothing persists between runs)
    Memory,
    /// PostgreSQL/PostGIS persistent storage
    Postgres,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the lake registry
    Lake(LakeArgs),

    /// Manage management unit types
    UnitType(UnitTypeArgs),

    /// Manage management units
    Unit(UnitArgs),

    /// Manage FN011 projects
    Project(ProjectArgs),

    /// Manage FN121 samples
    Sample(SampleArgs),

    /// Manage database operations
    Db(DbArgs),
}

#[derive(Parser, Debug)]
pub struct LakeArgs {
    #[command(subcommand)]
    pub command: LakeCommand,
}

#[derive(Subcommand, Debug)]
pub enum LakeCommand {
    /// Add a lake to the registry
    Add(LakeAddArgs),

    /// List all lakes
    List,
}

#[derive(Parser, Debug)]
pub struct LakeAddArgs {
    /// Two-letter lake abbreviation, e.g. "HU"
    #[arg(long)]
    pub abbrev: String,

    /// Full lake name, e.g. "Lake Huron"
    #[arg(long)]
    pub name: String,

    /// Path to a GeoJSON file with the lake boundary (MultiPolygon)
    #[arg(long)]
    pub boundary: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct UnitTypeArgs {
    #[command(subcommand)]
    pub command: UnitTypeCommand,
}

#[derive(Subcommand, Debug)]
pub enum UnitTypeCommand {
    /// Add a management unit type
    Add(UnitTypeAddArgs),

    /// List all management unit types
    List,
}

#[derive(Parser, Debug)]
pub struct UnitTypeAddArgs {
    /// Display label, e.g. "Quota Management Area"
    #[arg(long)]
    pub label: String,

    /// Short code; slugified once to form the stored abbreviation
    #[arg(long)]
    pub abbrev: String,

    /// Description of the unit type
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Parser, Debug)]
pub struct UnitArgs {
    #[command(subcommand)]
    pub command: UnitCommand,
}

#[derive(Subcommand, Debug)]
pub enum UnitCommand {
    /// Add a management unit
    Add(UnitAddArgs),

    /// Update an existing management unit
    Update(UnitUpdateArgs),

    /// Delete a management unit
    Delete(UnitDeleteArgs),

    /// List management units
    List(UnitListArgs),
}

#[derive(Parser, Debug)]
pub struct UnitAddArgs {
    /// Owning lake abbreviation, e.g. "HU"
    #[arg(long)]
    pub lake: String,

    /// Unit type abbreviation, e.g. "qma"
    #[arg(long)]
    pub mu_type: String,

    /// Unit label, e.g. "MU 1"
    #[arg(long)]
    pub label: String,

    /// Description of the unit
    #[arg(long, default_value = "")]
    pub description: String,

    /// Path to a GeoJSON file with the unit boundary (MultiPolygon)
    #[arg(long)]
    pub boundary: Option<PathBuf>,

    /// Mark this unit as belonging to the lake's primary unit type
    #[arg(long)]
    pub primary: bool,
}

#[derive(Parser, Debug)]
pub struct UnitUpdateArgs {
    /// Slug of the unit to update
    pub slug: String,

    /// New label (the slug is rederived)
    #[arg(long)]
    pub label: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Path to a GeoJSON file with the new boundary
    #[arg(long)]
    pub boundary: Option<PathBuf>,

    /// Set or clear the primary flag
    #[arg(long)]
    pub primary: Option<bool>,
}

#[derive(Parser, Debug)]
pub struct UnitDeleteArgs {
    /// Slug of the unit to delete
    pub slug: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct UnitListArgs {
    /// Filter by lake abbreviation
    #[arg(long)]
    pub lake: Option<String>,

    /// Filter by unit type abbreviation
    #[arg(long)]
    pub mu_type: Option<String>,

    /// Case-insensitive label substring search
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Add an FN011 project
    Add(ProjectAddArgs),

    /// List all projects
    List,
}

#[derive(Parser, Debug)]
pub struct ProjectAddArgs {
    /// Owning lake abbreviation
    #[arg(long)]
    pub lake: String,

    /// Unique 13-character project code, e.g. "LHA_IA12_123"
    #[arg(long)]
    pub prj_cd: String,

    /// Project name
    #[arg(long)]
    pub prj_nm: String,

    /// Four-character project year, e.g. "2012"
    #[arg(long)]
    pub year: String,

    /// Project start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Project end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Free-form project comment
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SampleArgs {
    #[command(subcommand)]
    pub command: SampleCommand,
}

#[derive(Subcommand, Debug)]
pub enum SampleCommand {
    /// Add an FN121 sample (runs the containment resolver)
    Add(SampleAddArgs),

    /// List samples for a project year
    List(SampleListArgs),
}

#[derive(Parser, Debug)]
pub struct SampleAddArgs {
    /// Project code of the owning FN011 project
    #[arg(long)]
    pub prj_cd: String,

    /// Sample number within the project, up to 5 characters
    #[arg(long)]
    pub sam: String,

    /// Latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Gear type code
    #[arg(long)]
    pub grtp: Option<String>,

    /// Gear code
    #[arg(long)]
    pub gr: Option<String>,

    /// Site depth in metres
    #[arg(long)]
    pub sidep: Option<f64>,

    /// Secchi depth in metres
    #[arg(long)]
    pub secchi: Option<f64>,

    /// Site label
    #[arg(long)]
    pub site: Option<String>,

    /// Free-form sample comment
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SampleListArgs {
    /// Project year to list (defaults to 2010)
    #[arg(long)]
    pub year: Option<String>,

    /// Unit type abbreviation for the attached unit lists
    #[arg(long)]
    pub mu_type: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Page size
    #[arg(long, default_value = "1000")]
    pub page_size: u32,
}

#[derive(Parser, Debug)]
pub struct DbArgs {
    /// Database management command
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Run pending database migrations
    Migrate,

    /// Show migration status
    Status,
}
