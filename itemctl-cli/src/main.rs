//! itemctl CLI - item service runner
//!
//! - `serve`: run the HTTP item API
//! - `migrate`: create the items table and exit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "itemctl",
    author,
    version,
    about = "HTTP CRUD service for inventory items"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP item API
    Serve(commands::serve::ServeArgs),
    /// Create the items table and exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so env-backed flags see .env values
    let dotenv = config::load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match dotenv.context("Failed to parse .env")? {
        Some(path) => debug!("Loaded .env from {}", path.display()),
        None => debug!("No .env file found, using environment only"),
    }

    match cli.command {
        Commands::Serve(args) => {
            info!(port = args.port, "Starting item service");
            commands::run_serve(args).await?
        }
        Commands::Migrate(args) => {
            commands::run_migrate(args).await?;
            info!("Migrations applied");
        }
    }

    Ok(())
}
