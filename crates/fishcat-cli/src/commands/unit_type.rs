use anyhow::{Context, Result};
use fishcat_core::models::{ManagementUnitType, UnitTypeId};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{UnitTypeArgs, UnitTypeCommand};
use crate::output::OutputWriter;
use crate::storage::Storage;

#[derive(Tabled, Serialize)]
struct UnitTypeRow {
    #[tabled(rename = "Abbrev")]
    abbrev: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub async fn execute(args: UnitTypeArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    match args.command {
        UnitTypeCommand::Add(add) => {
            let mu_type = storage
                .registry
                .create_unit_type(&ManagementUnitType {
                    id: UnitTypeId(0),
                    label: add.label,
                    abbrev: add.abbrev,
                    description: add.description,
                })
                .await
                .context("Failed to add unit type")?;

            output.success(format!("Added {}", mu_type));
            Ok(())
        }
        UnitTypeCommand::List => {
            let unit_types = storage
                .registry
                .list_unit_types()
                .await
                .context("Failed to list unit types")?;

            let rows: Vec<UnitTypeRow> = unit_types
                .into_iter()
                .map(|t| UnitTypeRow {
                    abbrev: t.abbrev,
                    label: t.label,
                    description: t.description,
                })
                .collect();

            output.table(rows);
            Ok(())
        }
    }
}
