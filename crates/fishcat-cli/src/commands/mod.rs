//! Command implementations

mod db;
mod lake;
mod project;
mod sample;
mod unit;
mod unit_type;

use std::path::Path;

use anyhow::{Context, Result};
use fishcat_core::models::Geometry;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use crate::storage::Storage;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    // `db` talks to PostgreSQL directly and ignores the storage flag.
    match cli.command {
        Commands::Db(args) => db::execute(args, &output).await,
        command => {
            let storage = Storage::new(cli.storage).await?;
            match command {
                Commands::Lake(args) => lake::execute(args, &storage, &output).await,
                Commands::UnitType(args) => unit_type::execute(args, &storage, &output).await,
                Commands::Unit(args) => unit::execute(args, &storage, &output).await,
                Commands::Project(args) => project::execute(args, &storage, &output).await,
                Commands::Sample(args) => sample::execute(args, &storage, &output).await,
                Commands::Db(_) => unreachable!(),
            }
        }
    }
}

/// Load a MultiPolygon boundary from a GeoJSON file.
pub(crate) fn load_boundary(path: &Path) -> Result<Geometry> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read boundary file {}", path.display()))?;

    fishcat_geo::convert::parse_geojson_boundary(&contents)
        .with_context(|| format!("Invalid boundary GeoJSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_boundary_from_geojson_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type":"MultiPolygon","coordinates":[[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]]]]}}"#
        )
        .unwrap();

        let boundary = load_boundary(file.path()).unwrap();
        assert!(matches!(boundary, Geometry::MultiPolygon { .. }));
    }

    #[test]
    fn test_load_boundary_rejects_point_geojson() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type":"Point","coordinates":[0.0,0.0]}}"#).unwrap();

        assert!(load_boundary(file.path()).is_err());
    }

    #[test]
    fn test_load_boundary_missing_file() {
        assert!(load_boundary(Path::new("/nonexistent/boundary.geojson")).is_err());
    }
}
