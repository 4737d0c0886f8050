use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use dialoguer::Confirm;
use fishcat_core::models::{ManagementUnit, UnitId};
use fishcat_store::ports::UnitFilter;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{UnitArgs, UnitCommand};
use crate::commands::load_boundary;
use crate::output::OutputWriter;
use crate::storage::Storage;

#[derive(Tabled, Serialize)]
struct UnitRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Lake")]
    lake: String,
    #[tabled(rename = "Type")]
    mu_type: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Primary")]
    primary: bool,
    #[tabled(rename = "Boundary")]
    boundary: &'static str,
}

pub async fn execute(args: UnitArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    match args.command {
        UnitCommand::Add(add) => {
            let lake = storage
                .registry
                .lake_by_abbrev(&add.lake)
                .await?
                .ok_or_else(|| anyhow!("Unknown lake abbreviation: {}", add.lake))?;

            let mu_type = storage
                .registry
                .unit_type_by_abbrev(&add.mu_type)
                .await?
                .ok_or_else(|| anyhow!("Unknown unit type abbreviation: {}", add.mu_type))?;

            let boundary = add.boundary.as_deref().map(load_boundary).transpose()?;

            let unit = storage
                .registry
                .create_unit(&ManagementUnit {
                    id: UnitId(0),
                    label: add.label,
                    slug: String::new(),
                    description: add.description,
                    boundary,
                    lake_id: lake.id,
                    mu_type_id: mu_type.id,
                    primary: add.primary,
                })
                .await
                .context("Failed to add management unit")?;

            output.success(format!("Added {} ({})", unit.name(&lake, &mu_type), unit.slug));
            Ok(())
        }
        UnitCommand::Update(update) => {
            let mut unit = storage
                .registry
                .unit_by_slug(&update.slug)
                .await?
                .ok_or_else(|| anyhow!("No management unit with slug: {}", update.slug))?;

            if let Some(label) = update.label {
                unit.label = label;
            }
            if let Some(description) = update.description {
                unit.description = description;
            }
            if let Some(path) = update.boundary.as_deref() {
                unit.boundary = Some(load_boundary(path)?);
            }
            if let Some(primary) = update.primary {
                unit.primary = primary;
            }

            let unit = storage
                .registry
                .update_unit(&unit)
                .await
                .context("Failed to update management unit")?;

            output.success(format!("Updated {}", unit.slug));
            Ok(())
        }
        UnitCommand::Delete(delete) => {
            let unit = storage
                .registry
                .unit_by_slug(&delete.slug)
                .await?
                .ok_or_else(|| anyhow!("No management unit with slug: {}", delete.slug))?;

            if !delete.yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete management unit {}?", unit.slug))
                    .default(false)
                    .interact()
                    .context("Confirmation prompt failed")?;
                if !confirmed {
                    output.info("Aborted");
                    return Ok(());
                }
            }

            storage
                .registry
                .delete_unit(unit.id)
                .await
                .context("Failed to delete management unit")?;

            output.success(format!("Deleted {}", unit.slug));
            Ok(())
        }
        UnitCommand::List(list) => {
            let filter = UnitFilter {
                lake: list.lake,
                mu_type: list.mu_type,
                search: list.search,
            };

            let units = storage
                .registry
                .list_units(&filter)
                .await
                .context("Failed to list management units")?;

            let lakes: HashMap<_, _> = storage
                .registry
                .list_lakes()
                .await?
                .into_iter()
                .map(|l| (l.id, l.abbrev))
                .collect();
            let unit_types: HashMap<_, _> = storage
                .registry
                .list_unit_types()
                .await?
                .into_iter()
                .map(|t| (t.id, t.abbrev))
                .collect();

            let rows: Vec<UnitRow> = units
                .into_iter()
                .map(|unit| UnitRow {
                    slug: unit.slug,
                    lake: lakes.get(&unit.lake_id).cloned().unwrap_or_default(),
                    mu_type: unit_types.get(&unit.mu_type_id).cloned().unwrap_or_default(),
                    label: unit.label,
                    primary: unit.primary,
                    boundary: if unit.boundary.is_some() { "yes" } else { "no" },
                })
                .collect();

            output.table(rows);
            Ok(())
        }
    }
}
