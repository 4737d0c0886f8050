use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use fishcat_core::models::{Fn011, ProjectId};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{ProjectArgs, ProjectCommand};
use crate::output::OutputWriter;
use crate::storage::Storage;

#[derive(Tabled, Serialize)]
struct ProjectRow {
    #[tabled(rename = "Code")]
    prj_cd: String,
    #[tabled(rename = "Name")]
    prj_nm: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Start")]
    prj_date0: NaiveDate,
    #[tabled(rename = "End")]
    prj_date1: NaiveDate,
}

fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date '{}', expected YYYY-MM-DD", flag, value))
}

pub async fn execute(args: ProjectArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    match args.command {
        ProjectCommand::Add(add) => {
            let lake = storage
                .registry
                .lake_by_abbrev(&add.lake)
                .await?
                .ok_or_else(|| anyhow!("Unknown lake abbreviation: {}", add.lake))?;

            let project = storage
                .projects
                .create_project(&Fn011 {
                    id: ProjectId(0),
                    lake_id: lake.id,
                    year: add.year,
                    prj_cd: add.prj_cd,
                    slug: String::new(),
                    prj_nm: add.prj_nm,
                    prj_date0: parse_date(&add.start, "--start")?,
                    prj_date1: parse_date(&add.end, "--end")?,
                    comment0: add.comment,
                })
                .await
                .context("Failed to add project")?;

            output.success(format!("Added {}", project));
            Ok(())
        }
        ProjectCommand::List => {
            let projects = storage
                .projects
                .list_projects()
                .await
                .context("Failed to list projects")?;

            let rows: Vec<ProjectRow> = projects
                .into_iter()
                .map(|p| ProjectRow {
                    prj_cd: p.prj_cd,
                    prj_nm: p.prj_nm,
                    year: p.year,
                    prj_date0: p.prj_date0,
                    prj_date1: p.prj_date1,
                })
                .collect();

            output.table(rows);
            Ok(())
        }
    }
}
