//! Read models for the public catalog pages

use serde::{Deserialize, Serialize};

/// A category or frame material with how many visible products and series
/// reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    pub id: i64,
    pub name: String,
    pub product_count: i64,
    pub series_count: i64,
}

/// Narrows the online catalog to one category and/or one frame material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogFilter {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub material_id: Option<i64>,
}

/// One series in the online catalog with its product statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesCard {
    pub series_id: i64,
    pub series_name: String,
    pub is_new_design: bool,
    pub pdf_url: String,
    pub material_name: String,
    pub models_count: i64,
    pub skus_count: i64,
}

/// Product tile on the series page. `image_url` is a stored file name until
/// the storefront service resolves it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: i64,
    pub model_no: String,
    pub image_url: Option<String>,
    pub lens_width: f32,
    pub nose_bridge: f32,
    pub temple_length: f32,
    pub frame_material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesShowcase {
    pub series_id: i64,
    pub series_name: String,
    pub description: String,
    pub pdf_url: String,
    pub is_new_design: bool,
    pub products: Vec<ProductCard>,
}
