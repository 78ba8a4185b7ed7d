//! Storage connectivity monitor
//!
//! Pings the store on an interval and publishes the result on a
//! `watch` channel. Transitions are logged once each. While storage is
//! down the probe backs off exponentially up to `max_backoff`; the pool
//! reconnects on its own once the database is back.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::store::ItemStore;

/// Last observed storage connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStatus {
    Connected,
    Disconnected,
}

/// Probe timing
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Delay between probes while healthy
    pub interval: Duration,
    /// First retry delay after a failed probe
    pub min_backoff: Duration,
    /// Upper bound for the retry delay
    pub max_backoff: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            min_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl MonitorConfig {
    /// Delay before the next probe after a failure.
    fn next_backoff(&self, current: Option<Duration>) -> Duration {
        match current {
            None => self.min_backoff,
            Some(d) => (d * 2).min(self.max_backoff),
        }
    }
}

/// Spawn the monitor task.
///
/// The caller owns the returned handle and aborts it on shutdown.
pub fn spawn_monitor(
    store: Arc<dyn ItemStore>,
    config: MonitorConfig,
    status: watch::Sender<StorageStatus>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut backoff: Option<Duration> = None;

        loop {
            let delay = match store.ping().await {
                Ok(()) => {
                    if *status.borrow() != StorageStatus::Connected {
                        tracing::info!("Storage connected");
                        status.send_replace(StorageStatus::Connected);
                    }
                    backoff = None;
                    config.interval
                }
                Err(e) => {
                    if *status.borrow() != StorageStatus::Disconnected {
                        tracing::warn!(error = %e, "Storage disconnected");
                        status.send_replace(StorageStatus::Disconnected);
                    }
                    let next = config.next_backoff(backoff);
                    tracing::debug!(retry_in = ?next, "Storage probe failed");
                    backoff = Some(next);
                    next
                }
            };

            tokio::time::sleep(delay).await;
        }
    })
}
