// ============================================================================
// Catalog Core - Series Entity
// File: crates/catalog-core/src/domain/series.rs
// Description: Product line sharing a frame material and a PDF lookbook
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub pdf_url: String,
    pub frame_material_id: i64,
    /// Joined from `frame_materials`; empty when the material was removed.
    pub frame_material_name: String,
    /// New designs are shown to VIP customers only.
    pub is_new_design: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSeries {
    #[validate(length(min = 1, max = 100, message = "Series name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: String,

    #[validate(length(min = 1, max = 512, message = "PDF url is required"))]
    pub pdf_url: String,

    #[validate(range(min = 1, message = "frame_material_id is required"))]
    pub frame_material_id: i64,

    #[serde(default)]
    pub is_new_design: bool,
}

impl NewSeries {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            pdf_url: self.pdf_url.trim().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeriesUpdate {
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Series name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: String,

    #[validate(length(min = 1, max = 512, message = "PDF url is required"))]
    pub pdf_url: String,

    #[validate(range(min = 1, message = "frame_material_id is required"))]
    pub frame_material_id: i64,

    #[serde(default)]
    pub is_new_design: bool,
}

impl SeriesUpdate {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            pdf_url: self.pdf_url.trim().to_string(),
            ..self
        }
    }
}
