// ============================================================================
// Catalog API - Series Handlers
// File: crates/catalog-api/src/handlers/series.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use catalog_core::domain::{NewSeries, Series, SeriesUpdate};
use catalog_shared::Page;

use super::{BatchDeleteResponse, IdList, PageQuery};
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/series
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Series>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.series.list_all().await?)))
}

/// GET /api/v1/admin/series/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<Series>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.series.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/series/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<Series>>, ApiError> {
    Ok(Json(ApiResponse::success(state.series.get(id).await?)))
}

/// POST /api/v1/admin/series
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewSeries>,
) -> Result<(StatusCode, Json<ApiResponse<Series>>), ApiError> {
    let created = state.series.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Series created"))))
}

/// PUT /api/v1/admin/series/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<SeriesUpdate>,
) -> Result<Json<ApiResponse<Series>>, ApiError> {
    payload.id = id;
    let updated = state.series.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Series updated")))
}

/// DELETE /api/v1/admin/series/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.series.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Series deleted")))
}

/// POST /api/v1/admin/series/batch-delete
pub async fn delete_batch(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<IdList>,
) -> Result<Json<ApiResponse<BatchDeleteResponse>>, ApiError> {
    let deleted = state.series.delete_batch(&payload.ids).await?;
    Ok(Json(ApiResponse::success(BatchDeleteResponse { deleted })))
}
