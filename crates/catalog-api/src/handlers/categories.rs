// ============================================================================
// Catalog API - Category Handlers
// File: crates/catalog-api/src/handlers/categories.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use catalog_core::domain::{CascaderOption, Category, CategoryUpdate, NewCategory};
use catalog_core::tree::TreeNode;
use catalog_shared::Page;

use super::PageQuery;
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolvePathRequest {
    pub main_category: String,
    pub sub_category: String,
}

#[derive(Debug, Serialize)]
pub struct ResolvePathResponse {
    pub category_id: i64,
}

/// GET /api/v1/admin/categories
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.categories.list_all().await?)))
}

/// GET /api/v1/admin/categories/tree
pub async fn tree(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<TreeNode<Category>>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    let page = state.categories.tree_page(q.query.trim(), pagination).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/v1/admin/categories/cascader
pub async fn cascader(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<CascaderOption>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.categories.cascader().await?)))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<Category>>, ApiError> {
    Ok(Json(ApiResponse::success(state.categories.get(id).await?)))
}

/// POST /api/v1/admin/categories
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewCategory>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    let created = state.categories.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Category created"))))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<CategoryUpdate>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    payload.id = id;
    let updated = state.categories.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Category updated")))
}

/// DELETE /api/v1/admin/categories/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.categories.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Category deleted")))
}

/// POST /api/v1/admin/categories/resolve-path
pub async fn resolve_path(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResolvePathRequest>,
) -> Result<Json<ApiResponse<ResolvePathResponse>>, ApiError> {
    if payload.main_category.trim().is_empty() || payload.sub_category.trim().is_empty() {
        return Err(ApiError::BadRequest("Both main_category and sub_category are required".into()));
    }
    let category_id = state
        .categories
        .resolve_path(&payload.main_category, &payload.sub_category)
        .await?;
    Ok(Json(ApiResponse::success(ResolvePathResponse { category_id })))
}
