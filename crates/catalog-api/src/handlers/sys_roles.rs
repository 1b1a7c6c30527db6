// ============================================================================
// Catalog API - Back-office Role Handlers
// File: crates/catalog-api/src/handlers/sys_roles.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use catalog_core::domain::{NewSysRole, SysRole, SysRoleDetail, SysRoleUpdate};
use catalog_shared::Page;

use super::{IdList, PageQuery};
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Grants {
    pub role_id: i64,
    pub ids: Vec<i64>,
}

/// GET /api/v1/admin/sys-roles
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<SysRole>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.sys_roles.list_all().await?)))
}

/// GET /api/v1/admin/sys-roles/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<SysRole>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.sys_roles.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/sys-roles/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SysRoleDetail>>, ApiError> {
    Ok(Json(ApiResponse::success(state.sys_roles.get(id).await?)))
}

/// POST /api/v1/admin/sys-roles
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewSysRole>,
) -> Result<(StatusCode, Json<ApiResponse<SysRole>>), ApiError> {
    let created = state.sys_roles.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Admin role created"))))
}

/// PUT /api/v1/admin/sys-roles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<SysRoleUpdate>,
) -> Result<Json<ApiResponse<SysRole>>, ApiError> {
    payload.id = id;
    let updated = state.sys_roles.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Admin role updated")))
}

/// DELETE /api/v1/admin/sys-roles/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.sys_roles.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Admin role deleted")))
}

/// PUT /api/v1/admin/sys-roles/{id}/permissions
pub async fn set_permissions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<IdList>,
) -> Result<Json<ApiResponse<Grants>>, ApiError> {
    let ids = state.sys_roles.set_permissions(id, &payload.ids).await?;
    Ok(Json(ApiResponse::success_with_message(Grants { role_id: id, ids }, "Permissions granted")))
}

/// PUT /api/v1/admin/sys-roles/{id}/menus
pub async fn set_menus(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<IdList>,
) -> Result<Json<ApiResponse<Grants>>, ApiError> {
    let ids = state.sys_roles.set_menus(id, &payload.ids).await?;
    Ok(Json(ApiResponse::success_with_message(Grants { role_id: id, ids }, "Menus granted")))
}
