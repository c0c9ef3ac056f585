use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::models::Store;
use crate::services::{CreateStoreDto, UpdateStoreDto};
use crate::state::AppState;

/// GET /stores - stores the caller is a member of
pub async fn list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Store>>, ApiError> {
    let stores = state.stores.find_all_by_user(claims.sub).await?;
    Ok(Json(stores))
}

/// POST /stores - the creator becomes the store's first OWNER
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(dto): Json<CreateStoreDto>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let store = state.stores.create(claims.sub, dto).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// GET /stores/:store_id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Store>, ApiError> {
    let store = state.stores.find_by_id(store_id).await?;
    Ok(Json(store))
}

/// PUT /stores/:store_id
pub async fn update(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(dto): Json<UpdateStoreDto>,
) -> Result<Json<Store>, ApiError> {
    let store = state.stores.update(store_id, dto).await?;
    Ok(Json(store))
}

/// DELETE /stores/:store_id
pub async fn delete(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.stores.delete(store_id).await?;
    Ok(StatusCode::OK)
}
