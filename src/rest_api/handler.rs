//! # REST API Handlers
//!
//! One handler per item operation. Each handler opens its own store session
//! after the request has been validated; the session is committed on success
//! and rolled back by drop on every other path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::schema::Item;

use super::errors::ApiResult;
use super::extract::{ItemId, ListParams, ValidatedItem};
use super::response::MessageResponse;
use super::state::SharedState;

/// Create item handler
pub async fn create_item(
    State(state): State<SharedState>,
    ValidatedItem(input): ValidatedItem,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let session = state.store.session().await?;
    let item = session.items().create(input).await?;
    session.commit().await?;

    debug!(id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// List items handler
pub async fn list_items(
    State(state): State<SharedState>,
    ListParams(page): ListParams,
) -> ApiResult<Json<Vec<Item>>> {
    let session = state.store.session().await?;
    let items = session.items().list(page).await?;
    Ok(Json(items))
}

/// Get single item handler
pub async fn get_item(
    State(state): State<SharedState>,
    ItemId(id): ItemId,
) -> ApiResult<Json<Item>> {
    let session = state.store.session().await?;
    let item = session.items().get(id).await?;
    Ok(Json(item))
}

/// Replace item handler
pub async fn update_item(
    State(state): State<SharedState>,
    ItemId(id): ItemId,
    ValidatedItem(input): ValidatedItem,
) -> ApiResult<Json<Item>> {
    let session = state.store.session().await?;
    let item = session.items().update(id, input).await?;
    session.commit().await?;

    debug!(id, "Item updated");
    Ok(Json(item))
}

/// Mark item done handler
pub async fn mark_item_done(
    State(state): State<SharedState>,
    ItemId(id): ItemId,
) -> ApiResult<Json<Item>> {
    let session = state.store.session().await?;
    let item = session.items().mark_done(id).await?;
    session.commit().await?;

    debug!(id, "Item marked done");
    Ok(Json(item))
}

/// Delete item handler
pub async fn delete_item(
    State(state): State<SharedState>,
    ItemId(id): ItemId,
) -> ApiResult<Json<MessageResponse>> {
    let session = state.store.session().await?;
    session.items().delete(id).await?;
    session.commit().await?;

    debug!(id, "Item deleted");
    Ok(Json(MessageResponse::deleted()))
}
