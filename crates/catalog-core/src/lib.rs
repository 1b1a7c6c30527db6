//! # Catalog Core
//! 
//! Hierarchy assembly, domain entities, services, and repository traits for
//! the eyewear catalog backend.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;
pub mod tree;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
