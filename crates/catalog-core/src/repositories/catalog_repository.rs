//! Storefront catalog read side (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{CatalogFilter, Facet, ProductCard, SeriesCard};
use crate::error::DomainError;

/// Aggregate queries behind the public pages. `include_new_design` is false
/// for every viewer that is not a VIP.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Categories with counts, narrowed by `filter.material_id`.
    async fn category_facets(&self, filter: CatalogFilter, include_new_design: bool)
        -> Result<Vec<Facet>, DomainError>;
    /// Frame materials with counts, narrowed by `filter.category_id`.
    async fn material_facets(&self, filter: CatalogFilter, include_new_design: bool)
        -> Result<Vec<Facet>, DomainError>;
    /// Series with at least one matching product, newest first.
    async fn series_cards(
        &self,
        filter: CatalogFilter,
        include_new_design: bool,
        pagination: Pagination,
    ) -> Result<(Vec<SeriesCard>, u64), DomainError>;
    /// Live products of a series with their first image file name.
    async fn series_products(&self, series_id: i64) -> Result<Vec<ProductCard>, DomainError>;
}
