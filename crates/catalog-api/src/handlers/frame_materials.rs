// ============================================================================
// Catalog API - Frame Material Handlers
// File: crates/catalog-api/src/handlers/frame_materials.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use catalog_core::domain::{FrameMaterial, FrameMaterialUpdate, NewFrameMaterial};
use catalog_shared::Page;

use super::{BatchDeleteResponse, IdList, PageQuery};
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/frame-materials
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<FrameMaterial>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.frame_materials.list_all().await?)))
}

/// GET /api/v1/admin/frame-materials/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<FrameMaterial>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.frame_materials.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/frame-materials/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<FrameMaterial>>, ApiError> {
    Ok(Json(ApiResponse::success(state.frame_materials.get(id).await?)))
}

/// POST /api/v1/admin/frame-materials
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewFrameMaterial>,
) -> Result<(StatusCode, Json<ApiResponse<FrameMaterial>>), ApiError> {
    let created = state.frame_materials.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Frame material created"))))
}

/// PUT /api/v1/admin/frame-materials/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<FrameMaterialUpdate>,
) -> Result<Json<ApiResponse<FrameMaterial>>, ApiError> {
    payload.id = id;
    let updated = state.frame_materials.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Frame material updated")))
}

/// DELETE /api/v1/admin/frame-materials/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.frame_materials.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Frame material deleted")))
}

/// POST /api/v1/admin/frame-materials/batch-delete
pub async fn delete_batch(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<IdList>,
) -> Result<Json<ApiResponse<BatchDeleteResponse>>, ApiError> {
    let deleted = state.frame_materials.delete_batch(&payload.ids).await?;
    Ok(Json(ApiResponse::success(BatchDeleteResponse { deleted })))
}
