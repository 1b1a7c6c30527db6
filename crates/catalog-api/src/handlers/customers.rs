// ============================================================================
// Catalog API - Storefront Account Handlers
// File: crates/catalog-api/src/handlers/customers.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use catalog_core::domain::{Customer, CustomerAccountUpdate, NewCustomerAccount};
use catalog_shared::Page;

use super::PageQuery;
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<PageQuery>,
) -> Result<Json<ApiResponse<Page<Customer>>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    Ok(Json(ApiResponse::success(state.customers.page(&q.query, pagination).await?)))
}

/// GET /api/v1/admin/users/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    Ok(Json(ApiResponse::success(state.customers.get(id).await?)))
}

/// POST /api/v1/admin/users
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewCustomerAccount>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), ApiError> {
    let created = state.customers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(created, "Account created"))))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(mut payload): JsonBody<CustomerAccountUpdate>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    payload.id = id;
    let updated = state.customers.update(payload).await?;
    Ok(Json(ApiResponse::success_with_message(updated, "Account updated")))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.customers.delete(id).await?;
    Ok(Json(ApiResponse::success_with_message((), "Account deleted")))
}
