// ============================================================================
// Catalog API - Storefront Role Handlers
// File: crates/catalog-api/src/handlers/roles.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use catalog_core::domain::{NewRole, Role, RoleUpdate};
use catalog_shared::Page;

use super::PageQuery;
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/roles
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Role>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.roles.list_all().await?)))
}

/// GET /api/v1/admin/roles/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<Role>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.roles.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/roles/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<Role>>, ApiError> {
    Ok(Json(ApiResponse::success(state.roles.get(id).await?)))
}

/// POST /api/v1/admin/roles
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewRole>,
) -> Result<(StatusCode, Json<ApiResponse<Role>>), ApiError> {
    let created = state.roles.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Role created"))))
}

/// PUT /api/v1/admin/roles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<RoleUpdate>,
) -> Result<Json<ApiResponse<Role>>, ApiError> {
    payload.id = id;
    let updated = state.roles.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Role updated")))
}

/// DELETE /api/v1/admin/roles/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.roles.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Role deleted")))
}
