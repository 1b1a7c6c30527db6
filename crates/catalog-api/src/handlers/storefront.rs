// ============================================================================
// Catalog API - Storefront Handlers
// File: crates/catalog-api/src/handlers/storefront.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use catalog_core::domain::{Brand, CatalogFilter, Category, SeriesShowcase};
use catalog_core::services::{CatalogOverview, CustomerProfile};
use catalog_core::tree::TreeNode;

use super::KeywordQuery;
use crate::error::ApiError;
use crate::extract::{MaybeAuthUser, QueryParams};
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub categories: Vec<TreeNode<Category>>,
    pub brands: Vec<Brand>,
    pub signed_in: bool,
}

/// GET /api/v1/home
pub async fn home(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Json<ApiResponse<HomeResponse>>, ApiError> {
    let categories = state.categories.tree("").await?;
    let brands = state.brands.list_all().await?;
    Ok(Json(ApiResponse::success(HomeResponse {
        categories,
        brands,
        signed_in: user.is_some(),
    })))
}

/// `?category_id=&material_id=&currentPage=&pageSize=`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category_id: Option<i64>,
    pub material_id: Option<i64>,
    #[serde(rename = "currentPage")]
    pub current_page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

/// GET /api/v1/catalog
pub async fn catalog(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    QueryParams(q): QueryParams<CatalogQuery>,
) -> Result<Json<ApiResponse<CatalogOverview>>, ApiError> {
    let pagination = state.pagination(q.current_page, q.page_size);
    let filter = CatalogFilter { category_id: q.category_id, material_id: q.material_id };
    let overview = state
        .storefront
        .overview(user.map(|u| u.user_id), filter, pagination)
        .await?;
    Ok(Json(ApiResponse::success(overview)))
}

/// GET /api/v1/series/{id}
pub async fn series(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SeriesShowcase>>, ApiError> {
    let showcase = state.storefront.series_showcase(user.map(|u| u.user_id), id).await?;
    Ok(Json(ApiResponse::success(showcase)))
}

/// GET /api/v1/categories/tree
pub async fn category_tree(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<KeywordQuery>,
) -> Result<Json<ApiResponse<Vec<TreeNode<Category>>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.categories.tree(q.query.trim()).await?)))
}

/// GET /api/v1/user/profile
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<CustomerProfile>>, ApiError> {
    Ok(Json(ApiResponse::success(state.auth.customer_profile(user.user_id).await?)))
}
