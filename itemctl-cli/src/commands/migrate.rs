//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use itemctl_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

/// Create the items table and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("Unable to connect to database")?;

    migrations::run(&pool)
        .await
        .context("Failed to prepare items table")?;

    pool.close().await;
    Ok(())
}
