//! Bearer token authentication

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use catalog_security::Realm;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated principal stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub realm: Realm,
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(state: &AppState, req: &Request, realm: Realm) -> Result<AuthUser, ApiError> {
    let token = bearer_token(req).ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;
    let claims = state.jwt.validate_access(token, realm)?;
    Ok(AuthUser { user_id: claims.user_id, realm })
}

pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user = authenticate(&state, &req, Realm::Admin)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

pub async fn require_customer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, &req, Realm::Storefront)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Attaches the customer when a valid token is present; never rejects.
pub async fn optional_customer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match authenticate(&state, &req, Realm::Storefront) {
        Ok(user) => {
            req.extensions_mut().insert(user);
        }
        Err(e) => debug!("Continuing without customer: {}", e),
    }
    next.run(req).await
}
