// ============================================================================
// Catalog API - Back-office User Handlers
// File: crates/catalog-api/src/handlers/sys_users.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use catalog_core::domain::{NewSysUser, SysUserSummary, SysUserUpdate};
use catalog_shared::Page;

use super::PageQuery;
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/sys-users/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<SysUserSummary>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.sys_users.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/sys-users/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SysUserSummary>>, ApiError> {
    Ok(Json(ApiResponse::success(state.sys_users.get(id).await?)))
}

/// POST /api/v1/admin/sys-users
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewSysUser>,
) -> Result<(StatusCode, Json<ApiResponse<SysUserSummary>>), ApiError> {
    let created = state.sys_users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Admin account created"))))
}

/// PUT /api/v1/admin/sys-users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<SysUserUpdate>,
) -> Result<Json<ApiResponse<SysUserSummary>>, ApiError> {
    payload.id = id;
    let updated = state.sys_users.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Admin account updated")))
}

/// DELETE /api/v1/admin/sys-users/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.sys_users.delete(user.user_id, id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Admin account deleted")))
}
