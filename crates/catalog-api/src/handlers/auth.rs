// ============================================================================
// Catalog API - Auth Handlers
// File: crates/catalog-api/src/handlers/auth.rs
// ============================================================================
//! Login, registration and token refresh

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use catalog_core::domain::{CustomerStatus, NewCustomer};
use catalog_core::services::LoginResult;
use catalog_security::TokenPair;

use crate::error::ApiError;
use crate::extract::{ClientIp, JsonBody};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn check(&self) -> Result<(), ApiError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest("Email and password are required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub status: CustomerStatus,
}

/// POST /api/v1/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    payload.check()?;
    let result = state.auth.admin_login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /api/v1/register
pub async fn register(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    JsonBody(payload): JsonBody<NewCustomer>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let auto_activate = state.config.catalog.auto_activate_customers;
    let customer = state
        .auth
        .register_customer(payload, ip.map(|ip| ip.to_string()), auto_activate)
        .await?;

    let message = if customer.can_login() {
        "Registration successful"
    } else {
        "Registration successful, the account awaits activation"
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            RegisterResponse {
                id: customer.id,
                username: customer.username,
                email: customer.email,
                status: customer.status,
            },
            message,
        )),
    ))
}

/// POST /api/v1/login
pub async fn customer_login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    payload.check()?;
    let result = state.auth.customer_login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    let pair = state.auth.refresh(payload.refresh_token.trim()).await?;
    Ok(Json(ApiResponse::success(pair)))
}
