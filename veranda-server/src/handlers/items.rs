//! Item registry endpoints: the grab-bag directory of residents, visitors,
//! staff, and their paperwork.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

use veranda_model::{Item, ItemPatch, NewItem};

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

pub async fn create_item(
    State(state): State<AppState>,
    Json(new): Json<NewItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    if new.name.trim().is_empty() {
        return Err(AppError::bad_request("Name is a required field"));
    }

    let item = Item::register(new);
    state.items.insert(&item).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.items.fetch_all().await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Item>> {
    let item = state
        .items
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::not_found("Item not found"))?;

    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ItemPatch>,
) -> AppResult<Json<Item>> {
    let mut item = state
        .items
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::not_found("Item not found"))?;

    item.apply(patch);
    state.items.replace(&item).await?;

    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    if !state.items.remove(id).await? {
        return Err(AppError::not_found("Item not found"));
    }

    Ok(Json(json!({ "message": "Item deleted successfully" })))
}
