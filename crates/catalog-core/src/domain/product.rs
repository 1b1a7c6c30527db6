// ============================================================================
// Catalog Core - Product Entity
// File: crates/catalog-core/src/domain/product.rs
// Description: Frame model with measurements and gallery images
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity. `image_urls` hold stored file names; services turn them
/// into public URLs before they leave the crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub model_no: String,
    pub item_code: Option<String>,
    pub title: String,
    pub gender: Option<String>,
    pub lens_width: f32,
    pub nose_bridge: f32,
    pub temple_length: f32,
    pub sku_count: i64,
    pub series_id: Option<i64>,
    pub series_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub brand_id: Option<i64>,
    pub brand_name: String,
    pub frame_material_id: i64,
    pub frame_material_name: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single product view with the category ids from the top level down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category_path: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 100, message = "Model number must be between 1 and 100 characters"))]
    pub model_no: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Item code too long"))]
    pub item_code: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "Gender too long"))]
    pub gender: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Lens width cannot be negative"))]
    pub lens_width: f32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Nose bridge cannot be negative"))]
    pub nose_bridge: f32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Temple length cannot be negative"))]
    pub temple_length: f32,

    #[serde(default)]
    #[validate(range(min = 0, message = "SKU count cannot be negative"))]
    pub sku_count: i64,

    #[serde(default)]
    pub series_id: Option<i64>,

    #[validate(range(min = 1, message = "category_id is required"))]
    pub category_id: i64,

    #[serde(default)]
    pub brand_id: Option<i64>,

    #[validate(range(min = 1, message = "frame_material_id is required"))]
    pub frame_material_id: i64,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description too long"))]
    pub description: String,

    #[validate(length(min = 1, message = "At least one image is required"))]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductUpdate {
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Model number must be between 1 and 100 characters"))]
    pub model_no: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Item code too long"))]
    pub item_code: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "Gender too long"))]
    pub gender: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Lens width cannot be negative"))]
    pub lens_width: f32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Nose bridge cannot be negative"))]
    pub nose_bridge: f32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Temple length cannot be negative"))]
    pub temple_length: f32,

    #[serde(default)]
    #[validate(range(min = 0, message = "SKU count cannot be negative"))]
    pub sku_count: i64,

    #[serde(default)]
    pub series_id: Option<i64>,

    #[validate(range(min = 1, message = "category_id is required"))]
    pub category_id: i64,

    #[serde(default)]
    pub brand_id: Option<i64>,

    #[validate(range(min = 1, message = "frame_material_id is required"))]
    pub frame_material_id: i64,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description too long"))]
    pub description: String,

    /// Images to add.
    #[serde(default)]
    pub image_urls: Vec<String>,

    /// Images to remove, as URLs or file names.
    #[serde(default)]
    pub deleted_image_urls: Vec<String>,
}

/// Stored file name of an uploaded image URL: everything after the last `/`.
pub fn image_file_name(url: &str) -> &str {
    let url = url.trim();
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// Public URL of a stored image file.
pub fn image_url(base_url: &str, file_name: &str) -> String {
    format!("{}/images/{}", base_url.trim_end_matches('/'), file_name)
}
