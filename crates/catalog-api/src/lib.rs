//! # Catalog API
//! 
//! HTTP handlers, middleware, extractors, and the response envelope.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use middleware::LoginRateLimiter;
pub use state::{AppState, Repositories};

#[cfg(test)]
pub(crate) mod test_support;
