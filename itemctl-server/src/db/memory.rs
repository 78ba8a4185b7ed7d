//! In-process item store
//!
//! Backs `itemctl serve --memory` and the router tests. Mirrors the
//! Postgres schema's quantity check so both stores reject the same input.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{ItemStore, StoreError};
use crate::models::{Item, ItemPatch, NewItem};

/// Item store held in memory, in creation order
#[derive(Default)]
pub struct MemoryItemStore {
    items: RwLock<Vec<Item>>,
    offline: AtomicBool,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing (or regaining) the storage backend.
    ///
    /// While unavailable every operation fails with `StoreError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, item: NewItem) -> Result<Item, StoreError> {
        self.check_online()?;
        item
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let item = item.into_item(Uuid::new_v4());
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        self.check_online()?;
        Ok(self.items.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        self.check_online()?;
        Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        self.check_online()?;
        patch
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|i| i.id == id).map(|item| {
            patch.apply(item);
            item.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        self.check_online()?;
        let mut items = self.items.write().await;
        Ok(items
            .iter()
            .position(|i| i.id == id)
            .map(|idx| items.remove(idx)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
