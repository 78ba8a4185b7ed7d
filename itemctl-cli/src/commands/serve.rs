//! HTTP server command
//!
//! Connects to storage (failing fast), prepares the schema, starts the
//! storage monitor and serves the item API until shutdown.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;

use itemctl_server::db::{
    create_pool_with_options, migrations, spawn_monitor, MonitorConfig, StorageStatus,
};
use itemctl_server::{run_server, AppState, ItemStore, MemoryItemStore, PgItemStore, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Database URL
    #[arg(long, env = "DATABASE_URL", required_unless_present = "memory")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Request timeout in seconds (0 disables)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout: u64,

    /// Only allow localhost origins instead of any origin
    #[arg(long)]
    pub cors_localhost: bool,

    /// Keep items in memory instead of a database (lost on exit, wins over --database-url)
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: !self.cors_localhost,
            request_timeout: (self.request_timeout > 0)
                .then(|| Duration::from_secs(self.request_timeout)),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    let store: Arc<dyn ItemStore> = match &args.database_url {
        Some(url) if !args.memory => {
            let pool = create_pool_with_options(
                url,
                args.max_connections,
                itemctl_server::db::pool::DEFAULT_ACQUIRE_TIMEOUT,
            )
            .await
            .context("Unable to connect to database")?;
            tracing::info!("Successfully connected to database");

            migrations::run(&pool)
                .await
                .context("Failed to prepare items table")?;

            Arc::new(PgItemStore::new(pool))
        }
        _ => {
            tracing::warn!("Using in-memory store; items are lost on exit");
            Arc::new(MemoryItemStore::new())
        }
    };

    let (status_tx, status_rx) = watch::channel(StorageStatus::Connected);
    let monitor = spawn_monitor(store.clone(), MonitorConfig::default(), status_tx);

    let result = run_server(AppState::new(store, status_rx), config)
        .await
        .context("Server error");

    monitor.abort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn memory_mode_needs_no_database() {
        let parsed = Wrapper::try_parse_from(["serve", "--memory", "--port", "9000"]).unwrap();
        assert!(parsed.args.memory);
        assert_eq!(parsed.args.server_config().bind_addr.port(), 9000);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let parsed = Wrapper::try_parse_from([
            "serve",
            "--memory",
            "--request-timeout",
            "0",
            "--cors-localhost",
        ])
        .unwrap();
        let config = parsed.args.server_config();
        assert!(config.request_timeout.is_none());
        assert!(!config.cors_permissive);
    }
}
