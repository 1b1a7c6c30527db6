// ============================================================================
// Catalog API - Product Handlers
// File: crates/catalog-api/src/handlers/products.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use catalog_core::domain::{NewProduct, Product, ProductDetail, ProductUpdate};
use catalog_shared::Page;

use super::{BatchDeleteResponse, IdList, PageQuery};
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/products/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<Product>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.products.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/products/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductDetail>>, ApiError> {
    Ok(Json(ApiResponse::success(state.products.get(id).await?)))
}

/// POST /api/v1/admin/products
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewProduct>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDetail>>), ApiError> {
    let created = state.products.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Product created"))))
}

/// PUT /api/v1/admin/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<ProductUpdate>,
) -> Result<Json<ApiResponse<ProductDetail>>, ApiError> {
    payload.id = id;
    let updated = state.products.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Product updated")))
}

/// DELETE /api/v1/admin/products/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.products.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Product deleted")))
}

/// POST /api/v1/admin/products/batch-delete
pub async fn delete_batch(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<IdList>,
) -> Result<Json<ApiResponse<BatchDeleteResponse>>, ApiError> {
    let deleted = state.products.delete_batch(&payload.ids).await?;
    Ok(Json(ApiResponse::success(BatchDeleteResponse { deleted })))
}
