use anyhow::{anyhow, Context, Result};
use fishcat_core::models::{Fn121, SampleId};
use fishcat_store::ports::SampleQuery;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{SampleArgs, SampleCommand};
use crate::output::OutputWriter;
use crate::storage::Storage;

#[derive(Tabled, Serialize)]
struct SampleRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Sam")]
    sam: String,
    #[tabled(rename = "Lat")]
    dd_lat: String,
    #[tabled(rename = "Lon")]
    dd_lon: String,
    #[tabled(rename = "Management units")]
    management_units: String,
}

pub async fn execute(args: SampleArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    match args.command {
        SampleCommand::Add(add) => {
            let project = storage
                .projects
                .project_by_code(&add.prj_cd)
                .await?
                .ok_or_else(|| anyhow!("Unknown project code: {}", add.prj_cd))?;

            let sample = storage
                .samples
                .create_sample(&Fn121 {
                    id: SampleId(0),
                    project_id: project.id,
                    sam: add.sam,
                    slug: String::new(),
                    grtp: add.grtp,
                    gr: add.gr,
                    effdt0: None,
                    effdt1: None,
                    effdur: None,
                    efftm0: None,
                    efftm1: None,
                    effst: None,
                    orient: None,
                    sidep: add.sidep,
                    secchi: add.secchi,
                    site: add.site,
                    sitem: None,
                    dd_lat: Some(add.lat),
                    dd_lon: Some(add.lon),
                    geom: None,
                    comment1: add.comment,
                    management_units: Vec::new(),
                })
                .await
                .context("Failed to add sample")?;

            output.success(format!("Added sample {}", sample.slug));
            if sample.management_units.is_empty() {
                output.info("Point falls outside all digitized unit boundaries");
            } else {
                output.info(format!(
                    "Contained by {} management unit(s)",
                    sample.management_units.len()
                ));
            }
            Ok(())
        }
        SampleCommand::List(list) => {
            let query = SampleQuery {
                mu_type: list.mu_type,
                year: list.year.unwrap_or_else(|| "2010".to_string()),
                page: list.page.max(1),
                page_size: list.page_size,
            };

            let page = storage
                .samples
                .list_samples(&query)
                .await
                .context("Failed to list samples")?;

            output.info(format!("{} sample(s) total", page.count));

            let rows: Vec<SampleRow> = page
                .results
                .into_iter()
                .map(|record| SampleRow {
                    slug: record.sample.slug,
                    sam: record.sample.sam,
                    dd_lat: record
                        .sample
                        .dd_lat
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                    dd_lon: record
                        .sample
                        .dd_lon
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                    management_units: record
                        .mu
                        .iter()
                        .map(|u| u.slug.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();

            output.table(rows);
            Ok(())
        }
    }
}
