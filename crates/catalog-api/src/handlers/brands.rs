// ============================================================================
// Catalog API - Brand Handlers
// File: crates/catalog-api/src/handlers/brands.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use catalog_core::domain::{Brand, BrandUpdate, NewBrand};
use catalog_shared::Page;

use super::{BatchDeleteResponse, IdList, PageQuery};
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/brands
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Brand>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.brands.list_all().await?)))
}

/// GET /api/v1/admin/brands/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<Brand>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.brands.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/brands/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<Brand>>, ApiError> {
    Ok(Json(ApiResponse::success(state.brands.get(id).await?)))
}

/// POST /api/v1/admin/brands
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewBrand>,
) -> Result<(StatusCode, Json<ApiResponse<Brand>>), ApiError> {
    let created = state.brands.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Brand created"))))
}

/// PUT /api/v1/admin/brands/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<BrandUpdate>,
) -> Result<Json<ApiResponse<Brand>>, ApiError> {
    payload.id = id;
    let updated = state.brands.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Brand updated")))
}

/// DELETE /api/v1/admin/brands/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.brands.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Brand deleted")))
}

/// POST /api/v1/admin/brands/batch-delete
pub async fn delete_batch(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<IdList>,
) -> Result<Json<ApiResponse<BatchDeleteResponse>>, ApiError> {
    let deleted = state.brands.delete_batch(&payload.ids).await?;
    Ok(Json(ApiResponse::success(BatchDeleteResponse { deleted })))
}
