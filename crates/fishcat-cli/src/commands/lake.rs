use anyhow::{Context, Result};
use fishcat_core::models::{Lake, LakeId};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{LakeArgs, LakeCommand};
use crate::commands::load_boundary;
use crate::output::OutputWriter;
use crate::storage::Storage;

#[derive(Tabled, Serialize)]
struct LakeRow {
    #[tabled(rename = "Abbrev")]
    abbrev: String,
    #[tabled(rename = "Name")]
    lake_name: String,
    #[tabled(rename = "Boundary")]
    boundary: &'static str,
}

pub async fn execute(args: LakeArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    match args.command {
        LakeCommand::Add(add) => {
            let boundary = add
                .boundary
                .as_deref()
                .map(load_boundary)
                .transpose()?;

            let lake = storage
                .registry
                .create_lake(&Lake {
                    id: LakeId(0),
                    abbrev: add.abbrev,
                    lake_name: add.name,
                    boundary,
                })
                .await
                .context("Failed to add lake")?;

            output.success(format!("Added {}", lake));
            Ok(())
        }
        LakeCommand::List => {
            let lakes = storage.registry.list_lakes().await.context("Failed to list lakes")?;

            let rows: Vec<LakeRow> = lakes
                .into_iter()
                .map(|lake| LakeRow {
                    abbrev: lake.abbrev,
                    lake_name: lake.lake_name,
                    boundary: if lake.boundary.is_some() { "yes" } else { "no" },
                })
                .collect();

            output.table(rows);
            Ok(())
        }
    }
}
