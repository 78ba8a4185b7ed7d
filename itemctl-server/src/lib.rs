//! itemctl-server: HTTP CRUD service for a single item resource
//!
//! Items (`name`, `description`, `quantity`) are stored through the
//! [`db::ItemStore`] trait and exposed over five JSON endpoints.

pub mod db;
pub mod http;
pub mod models;

pub use db::{ItemStore, MemoryItemStore, PgItemStore, StorageStatus, StoreError};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{Item, ItemPatch, NewItem};
