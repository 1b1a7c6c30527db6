//! HTTP middleware

pub mod auth;
pub mod rate_limit;

pub use auth::{optional_customer, require_admin, require_customer, AuthUser};
pub use rate_limit::{limit_login, LoginRateLimiter};
