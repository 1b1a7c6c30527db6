// ============================================================================
// Catalog API - Permission Handlers
// File: crates/catalog-api/src/handlers/permissions.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use catalog_core::domain::{NewPermission, Permission, PermissionUpdate};
use catalog_core::tree::TreeNode;
use catalog_shared::Page;

use super::{KeywordQuery, PageQuery};
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PermissionTree {
    pub sys_permissions: Vec<TreeNode<Permission>>,
}

/// GET /api/v1/admin/permissions/tree
pub async fn tree(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<KeywordQuery>,
) -> Result<Json<ApiResponse<PermissionTree>>, ApiError> {
    let sys_permissions = state.permissions.tree(q.query.trim()).await?;
    Ok(Json(ApiResponse::success(PermissionTree { sys_permissions })))
}

/// GET /api/v1/admin/permissions
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Permission>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.permissions.list_all().await?)))
}

/// GET /api/v1/admin/permissions/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<Permission>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.permissions.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/permissions/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<Permission>>, ApiError> {
    Ok(Json(ApiResponse::success(state.permissions.get(id).await?)))
}

/// POST /api/v1/admin/permissions
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewPermission>,
) -> Result<(StatusCode, Json<ApiResponse<Permission>>), ApiError> {
    let created = state.permissions.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Permission created"))))
}

/// PUT /api/v1/admin/permissions/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<PermissionUpdate>,
) -> Result<Json<ApiResponse<Permission>>, ApiError> {
    payload.id = id;
    let updated = state.permissions.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Permission updated")))
}

/// DELETE /api/v1/admin/permissions/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.permissions.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Permission deleted")))
}
