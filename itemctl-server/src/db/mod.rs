//! Storage layer - connection pool, schema and item stores
//!
//! # Design Principles
//!
//! - Handlers only see `dyn ItemStore`, never a pool
//! - One SQL statement per operation, `RETURNING` instead of re-reads
//! - Malformed ids never reach storage (rejected as not found upstream)

pub mod memory;
pub mod migrations;
pub mod monitor;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryItemStore;
pub use monitor::{spawn_monitor, MonitorConfig, StorageStatus};
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgItemStore;
pub use store::{ItemStore, StoreError};
