//! Item endpoints
//!
//! `/items` is the collection, `/items/{id}` a member. Update and delete
//! are also served on the older singular `/item/{id}` path.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ItemId, JsonBody};
use crate::http::server::AppState;
use crate::models::{Item, ItemPatch, NewItem};

/// Collection response
#[derive(Serialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}

/// Plain acknowledgement
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /items - create an item
async fn create_item(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<NewItem>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    body.validate()?;
    let item = state.store.insert(body).await?;
    tracing::info!(id = %item.id, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items - list every item
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<ItemList>, ApiError> {
    let items = state.store.find_all().await?;
    Ok(Json(ItemList { items }))
}

/// GET /items/{id} - get a single item
async fn get_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> Result<Json<Item>, ApiError> {
    let item = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(item))
}

/// PUT /items/{id} - replace the fields present in the body
async fn update_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
    JsonBody(patch): JsonBody<ItemPatch>,
) -> Result<Json<Item>, ApiError> {
    patch.validate()?;
    let item = state
        .store
        .update_by_id(id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!(%id, "Item updated");

    Ok(Json(item))
}

/// DELETE /items/{id} - hard delete
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .delete_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!(%id, "Item deleted");

    Ok(Json(MessageResponse {
        message: "Item was deleted successfully",
    }))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/item/{id}", put(update_item).delete(delete_item))
}
