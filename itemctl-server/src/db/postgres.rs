//! PostgreSQL item store
//!
//! Every operation is a single statement:
//! - insert: INSERT ... RETURNING (id from the column default)
//! - update/delete: ... RETURNING, so a missing row is just no row

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{ItemStore, StoreError};
use crate::models::{Item, ItemPatch, NewItem};

/// Item store backed by a Postgres pool
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn insert(&self, item: NewItem) -> Result<Item, StoreError> {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, quantity
            "#,
        )
        .bind(item.name)
        .bind(item.description)
        .bind(item.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, quantity
            FROM items
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        sqlx::query_as::<_, Item>("SELECT id, name, description, quantity FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn update_by_id(&self, id: Uuid, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        // Each column gets a "present" flag so absent fields keep their value
        // while an explicit null still clears.
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items SET
                name = CASE WHEN $2 THEN $3 ELSE name END,
                description = CASE WHEN $4 THEN $5 ELSE description END,
                quantity = CASE WHEN $6 THEN $7 ELSE quantity END
            WHERE id = $1
            RETURNING id, name, description, quantity
            "#,
        )
        .bind(id)
        .bind(patch.name.is_some())
        .bind(patch.name.flatten())
        .bind(patch.description.is_some())
        .bind(patch.description.flatten())
        .bind(patch.quantity.is_some())
        .bind(patch.quantity.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        sqlx::query_as::<_, Item>(
            "DELETE FROM items WHERE id = $1 RETURNING id, name, description, quantity",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(StoreError::from_sqlx)
    }
}
