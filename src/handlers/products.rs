use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Product;
use crate::services::{CreateProductDto, UpdateProductDto};
use crate::state::AppState;

/// GET /stores/:store_id/products
pub async fn list(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.find_all(store_id).await?;
    Ok(Json(products))
}

/// POST /stores/:store_id/products
pub async fn create(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(dto): Json<CreateProductDto>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(store_id, dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /stores/:store_id/products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((store_id, id)): Path<(Uuid, i64)>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.find_by_id(store_id, id).await?;
    Ok(Json(product))
}

/// PUT /stores/:store_id/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path((store_id, id)): Path<(Uuid, i64)>,
    Json(dto): Json<UpdateProductDto>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.update(store_id, id, dto).await?;
    Ok(Json(product))
}

/// DELETE /stores/:store_id/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path((store_id, id)): Path<(Uuid, i64)>,
) -> Result<StatusCode, ApiError> {
    state.products.delete(store_id, id).await?;
    Ok(StatusCode::OK)
}
