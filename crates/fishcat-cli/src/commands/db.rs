use anyhow::{Context, Result};
use fishcat_store::postgres::{PostgresConfig, PostgresStore};

use crate::cli::{DbArgs, DbCommand};
use crate::output::OutputWriter;

/// Execute database management commands
pub async fn execute(args: DbArgs, output: &OutputWriter) -> Result<()> {
    let config = PostgresConfig::from_env().context(
        "Failed to load database configuration. \
         Set DATABASE_URL or PGUSER/PGPASSWORD environment variables.",
    )?;

    let store = PostgresStore::new(config).await.context("Failed to connect to database")?;

    match args.command {
        DbCommand::Migrate => execute_migrate(&store, output).await,
        DbCommand::Status => execute_status(&store, output).await,
    }
}

async fn execute_migrate(store: &PostgresStore, output: &OutputWriter) -> Result<()> {
    output.info("Running migrations...");

    store.run_migrations().await.context("Failed to run migrations")?;

    output.success("Migrations are up to date");
    Ok(())
}

async fn execute_status(store: &PostgresStore, output: &OutputWriter) -> Result<()> {
    let statuses = store
        .migration_status()
        .await
        .context("Failed to check migration status")?;

    if statuses.is_empty() {
        output.warning("No migrations found");
        return Ok(());
    }

    for status in &statuses {
        let marker = if status.applied { "applied" } else { "pending" };
        output.info(format!("{:>14} {} ({})", status.version, status.description, marker));
    }

    let pending = statuses.iter().filter(|s| !s.applied).count();
    if pending == 0 {
        output.success("Database schema is up to date");
    } else {
        output.warning(format!("{} pending migration(s); run `fishcat db migrate`", pending));
    }

    Ok(())
}
