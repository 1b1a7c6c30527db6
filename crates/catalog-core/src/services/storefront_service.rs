// ============================================================================
// Catalog Core - Storefront Service
// File: crates/catalog-core/src/services/storefront_service.rs
// ============================================================================
//! The public online catalog. New-design series are visible to customers
//! holding the enabled VIP role only.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use catalog_shared::{Page, Pagination};

use crate::domain::{image_url, CatalogFilter, Facet, SeriesCard, SeriesShowcase};
use crate::error::DomainError;
use crate::repositories::{CatalogRepository, CustomerRepository, RoleRepository, SeriesRepository};

/// Landing data of the online catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogOverview {
    pub categories: Vec<Facet>,
    pub materials: Vec<Facet>,
    pub series: Page<SeriesCard>,
    pub vip: bool,
}

pub struct StorefrontService<Q, S, C, R>
where
    Q: CatalogRepository + ?Sized,
    S: SeriesRepository + ?Sized,
    C: CustomerRepository + ?Sized,
    R: RoleRepository + ?Sized,
{
    catalog: Arc<Q>,
    series: Arc<S>,
    customers: Arc<C>,
    roles: Arc<R>,
    vip_role_code: String,
    image_base_url: String,
}

impl<Q, S, C, R> StorefrontService<Q, S, C, R>
where
    Q: CatalogRepository + ?Sized,
    S: SeriesRepository + ?Sized,
    C: CustomerRepository + ?Sized,
    R: RoleRepository + ?Sized,
{
    pub fn new(
        catalog: Arc<Q>,
        series: Arc<S>,
        customers: Arc<C>,
        roles: Arc<R>,
        vip_role_code: impl Into<String>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            series,
            customers,
            roles,
            vip_role_code: vip_role_code.into(),
            image_base_url: image_base_url.into(),
        }
    }

    /// Whether `viewer` (a storefront customer id) sees new designs.
    pub async fn is_vip(&self, viewer: Option<i64>) -> Result<bool, DomainError> {
        let Some(customer_id) = viewer else {
            return Ok(false);
        };
        let Some(role_id) = self.customers.find_by_id(customer_id).await?.and_then(|c| c.role_id) else {
            return Ok(false);
        };
        let vip = self
            .roles
            .find_by_id(role_id)
            .await?
            .is_some_and(|role| role.is_enabled() && role.code.eq_ignore_ascii_case(&self.vip_role_code));
        Ok(vip)
    }

    pub async fn overview(
        &self,
        viewer: Option<i64>,
        filter: CatalogFilter,
        pagination: Pagination,
    ) -> Result<CatalogOverview, DomainError> {
        let vip = self.is_vip(viewer).await?;
        let categories = self.catalog.category_facets(filter, vip).await?;
        let materials = self.catalog.material_facets(filter, vip).await?;
        let (cards, total) = self.catalog.series_cards(filter, vip, pagination).await?;
        debug!(vip, ?filter, series = total, "catalog overview assembled");
        Ok(CatalogOverview {
            categories,
            materials,
            series: Page::new(cards, total, pagination),
            vip,
        })
    }

    /// A series with its products. New designs look missing to non-VIP
    /// viewers.
    pub async fn series_showcase(&self, viewer: Option<i64>, id: i64) -> Result<SeriesShowcase, DomainError> {
        let series = self.series.find_by_id(id).await?.ok_or(DomainError::SeriesNotFound(id))?;
        if series.is_new_design && !self.is_vip(viewer).await? {
            debug!(series_id = id, "new design hidden from non-VIP viewer");
            return Err(DomainError::SeriesNotFound(id));
        }

        let products = self
            .catalog
            .series_products(id)
            .await?
            .into_iter()
            .map(|mut card| {
                card.image_url = card.image_url.map(|file| image_url(&self.image_base_url, &file));
                card
            })
            .collect();
        Ok(SeriesShowcase {
            series_id: series.id,
            series_name: series.name,
            description: series.description,
            pdf_url: series.pdf_url,
            is_new_design: series.is_new_design,
            products,
        })
    }
}
