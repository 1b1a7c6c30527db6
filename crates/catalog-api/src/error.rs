//! HTTP error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use catalog_core::DomainError;
use catalog_security::JwtError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                ("VALIDATION_ERROR", msg)
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                ("UNAUTHORIZED", msg)
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                ("FORBIDDEN", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                ("NOT_FOUND", msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                ("CONFLICT", msg)
            }
            ApiError::TooManyRequests => {
                tracing::warn!("Rate limit exceeded");
                ("RATE_LIMITED", "Too many requests, try again later".to_string())
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                ("DATABASE_ERROR", "Internal server error".to_string())
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("INTERNAL_ERROR", "Internal server error".to_string())
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.is_not_found() {
            return ApiError::NotFound(err.to_string());
        }
        if err.is_conflict() {
            return ApiError::Conflict(err.to_string());
        }
        match err {
            DomainError::ValidationError(_)
            | DomainError::ParentCategoryNotFound(_)
            | DomainError::ParentPermissionNotFound(_)
            | DomainError::SelfParent(_)
            | DomainError::ParentCycle { .. }
            | DomainError::TreeTooDeep(_)
            | DomainError::ReferenceNotFound(_) => ApiError::BadRequest(err.to_string()),
            DomainError::InvalidCredentials | DomainError::InvalidToken(_) => ApiError::Unauthorized(err.to_string()),
            DomainError::AccountDisabled | DomainError::CannotDeleteSelf => ApiError::Forbidden(err.to_string()),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::CategoryNotFound(1), StatusCode::NOT_FOUND),
            (DomainError::PermissionAlreadyExists("x".into()), StatusCode::CONFLICT),
            (DomainError::ParentCategoryNotFound(9), StatusCode::BAD_REQUEST),
            (DomainError::SelfParent(2), StatusCode::BAD_REQUEST),
            (DomainError::ParentCycle { id: 1, parent_id: 2 }, StatusCode::BAD_REQUEST),
            (DomainError::TreeTooDeep(16), StatusCode::BAD_REQUEST),
            (DomainError::ReferenceNotFound("frame material 4".into()), StatusCode::BAD_REQUEST),
            (DomainError::SeriesNameAlreadyExists("Aero".into()), StatusCode::CONFLICT),
            (DomainError::ProductNotFound(3), StatusCode::NOT_FOUND),
            (DomainError::CannotDeleteSelf, StatusCode::FORBIDDEN),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::AccountDisabled, StatusCode::FORBIDDEN),
            (DomainError::DatabaseError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_jwt_errors_are_unauthorized() {
        assert_eq!(ApiError::from(JwtError::TokenExpired).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(JwtError::WrongRealm).status(), StatusCode::UNAUTHORIZED);
    }
}
