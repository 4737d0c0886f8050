//! RegistryStore implementation over PostGIS.
//!
//! Boundaries travel as GeoJSON through `ST_GeomFromGeoJSON` and
//! `ST_AsGeoJSON`; the database owns the spatial index.

use async_trait::async_trait;
use fishcat_core::error::{CatalogError, Result};
use fishcat_core::models::{
    Geometry, Lake, LakeId, ManagementUnit, ManagementUnitType, UnitId, UnitTypeId,
};
use fishcat_core::slug::{slugify, unit_slug};
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::{db_error, map_save_error, PostgresStore};
use crate::ports::{RegistryStore, UnitFilter};

fn boundary_from_row(row: &PgRow, column: &str) -> Result<Option<Geometry>> {
    let geojson: Option<String> = row.try_get(column).map_err(|e| db_error("Failed to read boundary", e))?;
    match geojson {
        Some(text) => {
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| CatalogError::Serialization(format!("Invalid boundary GeoJSON: {}", e)))?;
            let geometry = Geometry::from_geojson(&value).ok_or_else(|| {
                CatalogError::InvalidGeometry {
                    reason: "stored boundary is not a supported geometry".to_string(),
                }
            })?;
            Ok(Some(geometry))
        }
        None => Ok(None),
    }
}

fn boundary_to_geojson(boundary: &Option<Geometry>) -> Result<Option<String>> {
    boundary
        .as_ref()
        .map(|g| {
            serde_json::to_string(g)
                .map_err(|e| CatalogError::Serialization(format!("Failed to serialize boundary: {}", e)))
        })
        .transpose()
}

fn lake_from_row(row: &PgRow) -> Result<Lake> {
    Ok(Lake {
        id: LakeId(row.get("id")),
        abbrev: row.get("abbrev"),
        lake_name: row.get("lake_name"),
        boundary: boundary_from_row(row, "boundary")?,
    })
}

fn unit_type_from_row(row: &PgRow) -> ManagementUnitType {
    ManagementUnitType {
        id: UnitTypeId(row.get("id")),
        label: row.get("label"),
        abbrev: row.get("abbrev"),
        description: row.get("description"),
    }
}

fn unit_from_row(row: &PgRow) -> Result<ManagementUnit> {
    Ok(ManagementUnit {
        id: UnitId(row.get("id")),
        label: row.get("label"),
        slug: row.get("slug"),
        description: row.get("description"),
        boundary: boundary_from_row(row, "boundary")?,
        lake_id: LakeId(row.get("lake_id")),
        mu_type_id: UnitTypeId(row.get("mu_type_id")),
        primary: row.get("primary"),
    })
}

const UNIT_COLUMNS: &str = r#"id, label, slug, description,
    ST_AsGeoJSON(boundary) AS boundary, lake_id, mu_type_id, "primary""#;

impl PostgresStore {
    /// Derive the unit slug from its owning lake and unit type rows.
    async fn derive_unit_slug(&self, unit: &ManagementUnit) -> Result<String> {
        let lake_abbrev: Option<String> = sqlx::query_scalar("SELECT abbrev FROM lakes WHERE id = $1")
            .bind(unit.lake_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to look up lake", e))?;
        let lake_abbrev = lake_abbrev
            .ok_or_else(|| CatalogError::not_found("lake", unit.lake_id.0.to_string()))?;

        let type_abbrev: Option<String> =
            sqlx::query_scalar("SELECT abbrev FROM management_unit_types WHERE id = $1")
                .bind(unit.mu_type_id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to look up unit type", e))?;
        let type_abbrev = type_abbrev.ok_or_else(|| {
            CatalogError::not_found("management unit type", unit.mu_type_id.0.to_string())
        })?;

        Ok(unit_slug(&lake_abbrev, &type_abbrev, &unit.label))
    }
}

#[async_trait]
impl RegistryStore for PostgresStore {
    async fn create_lake(&self, lake: &Lake) -> Result<Lake> {
        let boundary = boundary_to_geojson(&lake.boundary)?;

        let row = sqlx::query(
            r#"
            INSERT INTO lakes (abbrev, lake_name, boundary)
            VALUES ($1, $2, ST_SetSRID(ST_GeomFromGeoJSON($3), 4326))
            RETURNING id, abbrev, lake_name, ST_AsGeoJSON(boundary) AS boundary
            "#,
        )
        .bind(&lake.abbrev)
        .bind(&lake.lake_name)
        .bind(boundary)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_save_error(e, "lake", &lake.abbrev, "Failed to store lake"))?;

        lake_from_row(&row)
    }

    async fn get_lake(&self, id: LakeId) -> Result<Option<Lake>> {
        let row = sqlx::query(
            "SELECT id, abbrev, lake_name, ST_AsGeoJSON(boundary) AS boundary FROM lakes WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get lake", e))?;

        row.map(|r| lake_from_row(&r)).transpose()
    }

    async fn lake_by_abbrev(&self, abbrev: &str) -> Result<Option<Lake>> {
        let row = sqlx::query(
            "SELECT id, abbrev, lake_name, ST_AsGeoJSON(boundary) AS boundary FROM lakes WHERE abbrev = $1",
        )
        .bind(abbrev)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get lake", e))?;

        row.map(|r| lake_from_row(&r)).transpose()
    }

    async fn list_lakes(&self) -> Result<Vec<Lake>> {
        let rows = sqlx::query(
            "SELECT id, abbrev, lake_name, ST_AsGeoJSON(boundary) AS boundary FROM lakes ORDER BY abbrev",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list lakes", e))?;

        rows.iter().map(lake_from_row).collect()
    }

    async fn create_unit_type(&self, mu_type: &ManagementUnitType) -> Result<ManagementUnitType> {
        // The abbreviation is slugified once at creation.
        let abbrev = slugify(&mu_type.abbrev);
        if abbrev.is_empty() {
            return Err(CatalogError::field_required("abbrev"));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO management_unit_types (label, abbrev, description)
            VALUES ($1, $2, $3)
            RETURNING id, label, abbrev, description
            "#,
        )
        .bind(&mu_type.label)
        .bind(&abbrev)
        .bind(&mu_type.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_save_error(e, "management unit type", &abbrev, "Failed to store unit type"))?;

        Ok(unit_type_from_row(&row))
    }

    async fn get_unit_type(&self, id: UnitTypeId) -> Result<Option<ManagementUnitType>> {
        let row = sqlx::query(
            "SELECT id, label, abbrev, description FROM management_unit_types WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get unit type", e))?;

        Ok(row.map(|r| unit_type_from_row(&r)))
    }

    async fn unit_type_by_abbrev(&self, abbrev: &str) -> Result<Option<ManagementUnitType>> {
        let row = sqlx::query(
            "SELECT id, label, abbrev, description FROM management_unit_types WHERE abbrev = $1",
        )
        .bind(abbrev)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get unit type", e))?;

        Ok(row.map(|r| unit_type_from_row(&r)))
    }

    async fn list_unit_types(&self) -> Result<Vec<ManagementUnitType>> {
        let rows = sqlx::query(
            "SELECT id, label, abbrev, description FROM management_unit_types ORDER BY abbrev",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list unit types", e))?;

        Ok(rows.iter().map(unit_type_from_row).collect())
    }

    async fn create_unit(&self, unit: &ManagementUnit) -> Result<ManagementUnit> {
        let slug = self.derive_unit_slug(unit).await?;
        let boundary = boundary_to_geojson(&unit.boundary)?;

        let query = format!(
            r#"
            INSERT INTO management_units
                (label, slug, description, boundary, lake_id, mu_type_id, "primary")
            VALUES ($1, $2, $3, ST_SetSRID(ST_GeomFromGeoJSON($4), 4326), $5, $6, $7)
            RETURNING {UNIT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&unit.label)
            .bind(&slug)
            .bind(&unit.description)
            .bind(boundary)
            .bind(unit.lake_id.0)
            .bind(unit.mu_type_id.0)
            .bind(unit.primary)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_save_error(e, "management unit", &slug, "Failed to store unit"))?;

        unit_from_row(&row)
    }

    async fn update_unit(&self, unit: &ManagementUnit) -> Result<ManagementUnit> {
        // Slug is recomputed unconditionally on every save.
        let slug = self.derive_unit_slug(unit).await?;
        let boundary = boundary_to_geojson(&unit.boundary)?;

        let query = format!(
            r#"
            UPDATE management_units
            SET label = $2, slug = $3, description = $4,
                boundary = ST_SetSRID(ST_GeomFromGeoJSON($5), 4326),
                lake_id = $6, mu_type_id = $7, "primary" = $8
            WHERE id = $1
            RETURNING {UNIT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(unit.id.0)
            .bind(&unit.label)
            .bind(&slug)
            .bind(&unit.description)
            .bind(boundary)
            .bind(unit.lake_id.0)
            .bind(unit.mu_type_id.0)
            .bind(unit.primary)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_save_error(e, "management unit", &slug, "Failed to update unit"))?;

        match row {
            Some(row) => unit_from_row(&row),
            None => Err(CatalogError::not_found("management unit", unit.id.0.to_string())),
        }
    }

    async fn delete_unit(&self, id: UnitId) -> Result<()> {
        let result = sqlx::query("DELETE FROM management_units WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete unit", e))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("management unit", id.0.to_string()));
        }
        Ok(())
    }

    async fn get_unit(&self, id: UnitId) -> Result<Option<ManagementUnit>> {
        let query = format!("SELECT {UNIT_COLUMNS} FROM management_units WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get unit", e))?;

        row.map(|r| unit_from_row(&r)).transpose()
    }

    async fn unit_by_slug(&self, slug: &str) -> Result<Option<ManagementUnit>> {
        let query = format!("SELECT {UNIT_COLUMNS} FROM management_units WHERE slug = $1");
        let row = sqlx::query(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get unit", e))?;

        row.map(|r| unit_from_row(&r)).transpose()
    }

    async fn list_units(&self, filter: &UnitFilter) -> Result<Vec<ManagementUnit>> {
        let query = format!(
            r#"
            SELECT {UNIT_COLUMNS} FROM management_units u
            WHERE ($1::text IS NULL OR u.lake_id IN (SELECT id FROM lakes WHERE abbrev = $1))
              AND ($2::text IS NULL
                   OR u.mu_type_id IN (SELECT id FROM management_unit_types WHERE abbrev = $2))
              AND ($3::text IS NULL OR u.label ILIKE '%' || $3 || '%')
            ORDER BY (SELECT abbrev FROM lakes WHERE id = u.lake_id), u.mu_type_id, u.label
            "#
        );

        let rows = sqlx::query(&query)
            .bind(filter.lake.as_deref())
            .bind(filter.mu_type.as_deref())
            .bind(filter.search.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list units", e))?;

        rows.iter().map(unit_from_row).collect()
    }
}
