use axum::{extract::State, Json};

use catalog_core::domain::Menu;
use catalog_core::tree::TreeNode;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/admin/menus
pub async fn my_menus(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<TreeNode<Menu>>>>, ApiError> {
    let menus = state.menus.menus_for(user.user_id).await?;
    Ok(Json(ApiResponse::success(menus)))
}

/// GET /api/v1/admin/menus/tree
pub async fn tree(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<TreeNode<Menu>>>>, ApiError> {
    Ok(Json(ApiResponse::success(state.menus.tree_all().await?)))
}
