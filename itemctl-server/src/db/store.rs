//! Storage trait for items (testable)

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Item, ItemPatch, NewItem};

/// Storage error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A field constraint enforced by storage was violated
    #[error("constraint violated: {0}")]
    Validation(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Sort a driver error into constraint violations and everything else.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_check_violation() => Self::Validation(db.message().to_owned()),
            _ => Self::Sqlx(err),
        }
    }
}

/// Item persistence.
///
/// "Not found" is `Ok(None)`, never an error.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// Store a new item; the store assigns the id.
    async fn insert(&self, item: NewItem) -> Result<Item, StoreError>;

    /// All items in creation order.
    async fn find_all(&self) -> Result<Vec<Item>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, StoreError>;

    /// Apply `patch` and return the post-update record.
    async fn update_by_id(&self, id: Uuid, patch: ItemPatch) -> Result<Option<Item>, StoreError>;

    /// Hard delete, returning the removed record.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Item>, StoreError>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
