// ============================================================================
// Catalog Core - Brand Entity
// File: crates/catalog-core/src/domain/brand.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Brand entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBrand {
    #[validate(length(min = 1, max = 100, message = "Brand name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BrandUpdate {
    /// Taken from the request path when absent from the body.
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Brand name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: String,
}
