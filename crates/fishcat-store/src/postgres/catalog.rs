//! ProjectStore and SampleStore implementations over PostGIS.
//!
//! The sample save runs inside one transaction: the row write, the
//! `ST_Contains` containment query and the association replace commit
//! together or roll back together.

use async_trait::async_trait;
use fishcat_core::error::{CatalogError, Result};
use fishcat_core::models::{
    Fn011, Fn121, Geometry, LakeId, ProjectId, SampleId, UnitId, UnitRef,
};
use fishcat_core::slug::{project_slug, sample_slug};
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::collections::HashMap;

use super::{db_error, map_save_error, PostgresStore};
use crate::ports::{ProjectStore, SamplePage, SampleQuery, SampleRecord, SampleStore};

fn project_from_row(row: &PgRow) -> Fn011 {
    Fn011 {
        id: ProjectId(row.get("id")),
        lake_id: LakeId(row.get("lake_id")),
        year: row.get("year"),
        prj_cd: row.get("prj_cd"),
        slug: row.get("slug"),
        prj_nm: row.get("prj_nm"),
        prj_date0: row.get("prj_date0"),
        prj_date1: row.get("prj_date1"),
        comment0: row.get("comment0"),
    }
}

fn sample_from_row(row: &PgRow) -> Fn121 {
    Fn121 {
        id: SampleId(row.get("id")),
        project_id: ProjectId(row.get("project_id")),
        sam: row.get("sam"),
        slug: row.get("slug"),
        grtp: row.get("grtp"),
        gr: row.get("gr"),
        effdt0: row.get("effdt0"),
        effdt1: row.get("effdt1"),
        effdur: row.get("effdur"),
        efftm0: row.get("efftm0"),
        efftm1: row.get("efftm1"),
        effst: row.get("effst"),
        orient: row.get("orient"),
        sidep: row.get("sidep"),
        secchi: row.get("secchi"),
        site: row.get("site"),
        sitem: row.get("sitem"),
        dd_lat: row.get("dd_lat"),
        dd_lon: row.get("dd_lon"),
        geom: {
            let lon: Option<f64> = row.get("dd_lon");
            let lat: Option<f64> = row.get("dd_lat");
            match (lon, lat) {
                (Some(lon), Some(lat)) => Some(Geometry::point(lon, lat)),
                _ => None,
            }
        },
        comment1: row.get("comment1"),
        management_units: Vec::new(),
    }
}

const PROJECT_COLUMNS: &str =
    "id, lake_id, year, prj_cd, slug, prj_nm, prj_date0, prj_date1, comment0";

const SAMPLE_COLUMNS: &str = "id, project_id, sam, slug, grtp, gr, effdt0, effdt1, effdur, \
    efftm0, efftm1, effst, orient, sidep, secchi, site, sitem, dd_lat, dd_lon, comment1";

#[async_trait]
impl ProjectStore for PostgresStore {
    async fn create_project(&self, project: &Fn011) -> Result<Fn011> {
        if project.prj_cd.chars().count() > Fn011::PRJ_CD_MAX {
            return Err(CatalogError::field_too_long("prj_cd", Fn011::PRJ_CD_MAX));
        }
        let slug = project_slug(&project.prj_cd);

        let query = format!(
            r#"
            INSERT INTO fn011 (lake_id, year, prj_cd, slug, prj_nm, prj_date0, prj_date1, comment0)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROJECT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(project.lake_id.0)
            .bind(&project.year)
            .bind(&project.prj_cd)
            .bind(&slug)
            .bind(&project.prj_nm)
            .bind(project.prj_date0)
            .bind(project.prj_date1)
            .bind(project.comment0.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_save_error(e, "project", &project.prj_cd, "Failed to store project"))?;

        Ok(project_from_row(&row))
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<Fn011>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM fn011 WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get project", e))?;

        Ok(row.map(|r| project_from_row(&r)))
    }

    async fn project_by_code(&self, prj_cd: &str) -> Result<Option<Fn011>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM fn011 WHERE prj_cd = $1");
        let row = sqlx::query(&query)
            .bind(prj_cd)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get project", e))?;

        Ok(row.map(|r| project_from_row(&r)))
    }

    async fn list_projects(&self) -> Result<Vec<Fn011>> {
        let query =
            format!("SELECT {PROJECT_COLUMNS} FROM fn011 ORDER BY year DESC, prj_date1 DESC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list projects", e))?;

        Ok(rows.iter().map(project_from_row).collect())
    }
}

impl PostgresStore {
    /// The shared save path: validate coordinates, write the row, resolve
    /// containment with `ST_Contains` over the GiST-indexed boundaries, and
    /// replace the association - all in one transaction.
    async fn save_sample(&self, sample: &Fn121, existing: Option<SampleId>) -> Result<Fn121> {
        let dd_lon = sample
            .dd_lon
            .ok_or_else(|| CatalogError::field_required("dd_lon"))?;
        let dd_lat = sample
            .dd_lat
            .ok_or_else(|| CatalogError::field_required("dd_lat"))?;
        if sample.sam.chars().count() > Fn121::SAM_MAX {
            return Err(CatalogError::field_too_long("sam", Fn121::SAM_MAX));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let prj_cd: Option<String> = sqlx::query_scalar("SELECT prj_cd FROM fn011 WHERE id = $1")
            .bind(sample.project_id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to look up project", e))?;
        let prj_cd = prj_cd
            .ok_or_else(|| CatalogError::not_found("project", sample.project_id.0.to_string()))?;

        let slug = sample_slug(&prj_cd, &sample.sam);

        let row = match existing {
            None => {
                let query = format!(
                    r#"
                    INSERT INTO fn121
                        (project_id, sam, slug, grtp, gr, effdt0, effdt1, effdur, efftm0,
                         efftm1, effst, orient, sidep, secchi, site, sitem, dd_lat, dd_lon,
                         geom, comment1)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                            $15, $16, $17, $18, ST_SetSRID(ST_MakePoint($18, $17), 4326), $19)
                    RETURNING {SAMPLE_COLUMNS}
                    "#
                );
                sqlx::query(&query)
                    .bind(sample.project_id.0)
                    .bind(&sample.sam)
                    .bind(&slug)
                    .bind(sample.grtp.as_deref())
                    .bind(sample.gr.as_deref())
                    .bind(sample.effdt0)
                    .bind(sample.effdt1)
                    .bind(sample.effdur)
                    .bind(sample.efftm0)
                    .bind(sample.efftm1)
                    .bind(sample.effst.as_deref())
                    .bind(sample.orient.as_deref())
                    .bind(sample.sidep)
                    .bind(sample.secchi)
                    .bind(sample.site.as_deref())
                    .bind(sample.sitem.as_deref())
                    .bind(dd_lat)
                    .bind(dd_lon)
                    .bind(sample.comment1.as_deref())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| map_save_error(e, "sample", &slug, "Failed to store sample"))?
            }
            Some(id) => {
                let query = format!(
                    r#"
                    UPDATE fn121
                    SET project_id = $2, sam = $3, slug = $4, grtp = $5, gr = $6,
                        effdt0 = $7, effdt1 = $8, effdur = $9, efftm0 = $10, efftm1 = $11,
                        effst = $12, orient = $13, sidep = $14, secchi = $15, site = $16,
                        sitem = $17, dd_lat = $18, dd_lon = $19,
                        geom = ST_SetSRID(ST_MakePoint($19, $18), 4326), comment1 = $20
                    WHERE id = $1
                    RETURNING {SAMPLE_COLUMNS}
                    "#
                );
                sqlx::query(&query)
                    .bind(id.0)
                    .bind(sample.project_id.0)
                    .bind(&sample.sam)
                    .bind(&slug)
                    .bind(sample.grtp.as_deref())
                    .bind(sample.gr.as_deref())
                    .bind(sample.effdt0)
                    .bind(sample.effdt1)
                    .bind(sample.effdur)
                    .bind(sample.efftm0)
                    .bind(sample.efftm1)
                    .bind(sample.effst.as_deref())
                    .bind(sample.orient.as_deref())
                    .bind(sample.sidep)
                    .bind(sample.secchi)
                    .bind(sample.site.as_deref())
                    .bind(sample.sitem.as_deref())
                    .bind(dd_lat)
                    .bind(dd_lon)
                    .bind(sample.comment1.as_deref())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| map_save_error(e, "sample", &slug, "Failed to update sample"))?
                    .ok_or_else(|| CatalogError::not_found("sample", id.0.to_string()))?
            }
        };

        let mut saved = sample_from_row(&row);

        // Containment: every unit whose boundary contains the point.
        let unit_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM management_units
            WHERE boundary IS NOT NULL
              AND ST_Contains(boundary, ST_SetSRID(ST_MakePoint($1, $2), 4326))
            ORDER BY id
            "#,
        )
        .bind(dd_lon)
        .bind(dd_lat)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_error("Containment query failed", e))?;

        // Full replace of the derived association, never a merge.
        sqlx::query("DELETE FROM fn121_management_units WHERE sample_id = $1")
            .bind(saved.id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to clear associations", e))?;

        if !unit_ids.is_empty() {
            sqlx::query(
                "INSERT INTO fn121_management_units (sample_id, unit_id) \
                 SELECT $1, unnest($2::bigint[])",
            )
            .bind(saved.id.0)
            .bind(&unit_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to store associations", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit sample save", e))?;

        saved.management_units = unit_ids.into_iter().map(UnitId).collect();
        Ok(saved)
    }
}

#[async_trait]
impl SampleStore for PostgresStore {
    async fn create_sample(&self, sample: &Fn121) -> Result<Fn121> {
        self.save_sample(sample, None).await
    }

    async fn update_sample(&self, sample: &Fn121) -> Result<Fn121> {
        self.save_sample(sample, Some(sample.id)).await
    }

    async fn get_sample(&self, id: SampleId) -> Result<Option<Fn121>> {
        let query = format!("SELECT {SAMPLE_COLUMNS} FROM fn121 WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get sample", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut sample = sample_from_row(&row);

        let unit_ids: Vec<i64> = sqlx::query_scalar(
            "SELECT unit_id FROM fn121_management_units WHERE sample_id = $1 ORDER BY unit_id",
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get sample associations", e))?;

        sample.management_units = unit_ids.into_iter().map(UnitId).collect();
        Ok(Some(sample))
    }

    async fn list_samples(&self, query: &SampleQuery) -> Result<SamplePage> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM fn121 \
             WHERE project_id IN (SELECT id FROM fn011 WHERE year = $1)",
        )
        .bind(&query.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count samples", e))?;

        let offset = (query.page.saturating_sub(1) as i64) * query.page_size as i64;
        let page_query = format!(
            r#"
            SELECT {SAMPLE_COLUMNS} FROM fn121
            WHERE project_id IN (SELECT id FROM fn011 WHERE year = $1)
            ORDER BY project_id, sam
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query(&page_query)
            .bind(&query.year)
            .bind(query.page_size as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list samples", e))?;

        let samples: Vec<Fn121> = rows.iter().map(sample_from_row).collect();
        let sample_ids: Vec<i64> = samples.iter().map(|s| s.id.0).collect();

        // Prefetch the attached unit labels for the page, one unit-type
        // dimension at a time; boundary geometry is never fetched here.
        let unit_rows = sqlx::query(
            r#"
            SELECT a.sample_id, u.id, u.label, u.slug
            FROM fn121_management_units a
            JOIN management_units u ON u.id = a.unit_id
            JOIN management_unit_types t ON t.id = u.mu_type_id
            WHERE a.sample_id = ANY($1)
              AND (($2::text IS NOT NULL AND t.abbrev = $2)
                   OR ($2::text IS NULL AND u."primary"))
            ORDER BY u.slug
            "#,
        )
        .bind(&sample_ids)
        .bind(query.mu_type.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to prefetch sample units", e))?;

        let mut attached: HashMap<i64, Vec<UnitRef>> = HashMap::new();
        for row in &unit_rows {
            let sample_id: i64 = row.get("sample_id");
            attached.entry(sample_id).or_default().push(UnitRef {
                id: UnitId(row.get("id")),
                label: row.get("label"),
                slug: row.get("slug"),
            });
        }

        let results = samples
            .into_iter()
            .map(|sample| {
                let mu = attached.remove(&sample.id.0).unwrap_or_default();
                SampleRecord { sample, mu }
            })
            .collect();

        Ok(SamplePage { count: count as u64, results })
    }
}
