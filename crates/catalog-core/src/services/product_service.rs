// ============================================================================
// Catalog Core - Product Service
// File: crates/catalog-core/src/services/product_service.rs
// ============================================================================
//! Product management for the admin console. Images are stored as bare file
//! names and resolved against the configured base URL on the way out.

use std::sync::Arc;

use catalog_shared::constants::MAX_TREE_DEPTH;
use catalog_shared::{Page, Pagination};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{image_file_name, image_url, NewProduct, Product, ProductDetail, ProductUpdate};
use crate::error::DomainError;
use crate::repositories::{CategoryRepository, ProductRepository, SeriesRepository};
use crate::services::sys_role_service::dedup;
use crate::tree::ancestor_path;

pub struct ProductService<P, S, C>
where
    P: ProductRepository + ?Sized,
    S: SeriesRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    products: Arc<P>,
    series: Arc<S>,
    categories: Arc<C>,
    image_base_url: String,
}

impl<P, S, C> ProductService<P, S, C>
where
    P: ProductRepository + ?Sized,
    S: SeriesRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub fn new(products: Arc<P>, series: Arc<S>, categories: Arc<C>, image_base_url: impl Into<String>) -> Self {
        Self { products, series, categories, image_base_url: image_base_url.into() }
    }

    /// `query` is a prefix of the item code or model number.
    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<Product>, DomainError> {
        let (items, total) = self.products.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination).map(|p| self.resolve(p)))
    }

    pub async fn get(&self, id: i64) -> Result<ProductDetail, DomainError> {
        let product = self.products.find_by_id(id).await?.ok_or(DomainError::ProductNotFound(id))?;
        let categories = self.categories.list_ordered().await?;
        let category_path = ancestor_path(&categories, product.category_id, MAX_TREE_DEPTH);
        Ok(ProductDetail { product: self.resolve(product), category_path })
    }

    pub async fn create(&self, input: NewProduct) -> Result<ProductDetail, DomainError> {
        let input = NewProduct {
            model_no: input.model_no.trim().to_string(),
            item_code: non_empty(input.item_code),
            title: input.title.trim().to_string(),
            gender: non_empty(input.gender),
            description: input.description.trim().to_string(),
            image_urls: file_names(&input.image_urls),
            ..input
        };
        input.validate()?;
        self.ensure_references(input.category_id, input.series_id, input.frame_material_id)
            .await?;

        let created = self.products.create(&input).await?;
        info!(id = created.id, model_no = %created.model_no, images = input.image_urls.len(), "product created");
        self.get(created.id).await
    }

    /// Updates the product; `deleted_image_urls` are removed before
    /// `image_urls` are added.
    pub async fn update(&self, input: ProductUpdate) -> Result<ProductDetail, DomainError> {
        let input = ProductUpdate {
            model_no: input.model_no.trim().to_string(),
            item_code: non_empty(input.item_code),
            title: input.title.trim().to_string(),
            gender: non_empty(input.gender),
            description: input.description.trim().to_string(),
            image_urls: file_names(&input.image_urls),
            deleted_image_urls: file_names(&input.deleted_image_urls),
            ..input
        };
        input.validate()?;
        self.ensure_references(input.category_id, input.series_id, input.frame_material_id)
            .await?;

        let updated = self
            .products
            .update(&input)
            .await?
            .ok_or(DomainError::ProductNotFound(input.id))?;
        info!(
            id = updated.id,
            added = input.image_urls.len(),
            removed = input.deleted_image_urls.len(),
            "product updated"
        );
        self.get(updated.id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.products.delete(id).await? {
            return Err(DomainError::ProductNotFound(id));
        }
        info!(id, "product deleted");
        Ok(())
    }

    pub async fn delete_batch(&self, ids: &[i64]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::ValidationError("ids: at least one id is required".into()));
        }
        let ids = dedup(ids);
        let removed = self.products.delete_many(&ids).await?;
        info!(requested = ids.len(), removed, "products deleted");
        Ok(removed)
    }

    async fn ensure_references(
        &self,
        category_id: i64,
        series_id: Option<i64>,
        frame_material_id: i64,
    ) -> Result<(), DomainError> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(DomainError::ReferenceNotFound(format!("category {}", category_id)));
        }
        let Some(series_id) = series_id else {
            return Ok(());
        };
        let series = self
            .series
            .find_by_id(series_id)
            .await?
            .ok_or_else(|| DomainError::ReferenceNotFound(format!("series {}", series_id)))?;
        if series.frame_material_id != frame_material_id {
            warn!(series_id, series_material = series.frame_material_id, frame_material_id, "product material differs from its series");
            return Err(DomainError::ValidationError(format!(
                "frame_material_id: must match series {} material {}",
                series_id, series.frame_material_id
            )));
        }
        Ok(())
    }

    fn resolve(&self, product: Product) -> Product {
        let image_urls = product
            .image_urls
            .iter()
            .map(|file| image_url(&self.image_base_url, file))
            .collect();
        Product { image_urls, ..product }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn file_names(urls: &[String]) -> Vec<String> {
    urls.iter()
        .map(|url| image_file_name(url))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Series};
    use crate::repositories::{MockCategoryRepository, MockProductRepository, MockSeriesRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    type Service = ProductService<MockProductRepository, MockSeriesRepository, MockCategoryRepository>;

    fn service(products: MockProductRepository, series: MockSeriesRepository, categories: MockCategoryRepository) -> Service {
        ProductService::new(Arc::new(products), Arc::new(series), Arc::new(categories), "https://cdn.example.com/")
    }

    fn category(id: i64, parent_id: i64) -> Category {
        let now = Utc::now();
        Category {
            id,
            parent_id,
            name: format!("c{id}"),
            slug: format!("c{id}"),
            description: String::new(),
            display_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn categories() -> MockCategoryRepository {
        let mut mock = MockCategoryRepository::new();
        mock.expect_find_by_id().returning(|id| Ok((id <= 3).then(|| category(id, id - 1))));
        mock.expect_list_ordered()
            .returning(|| Ok(vec![category(1, 0), category(2, 1), category(3, 2)]));
        mock
    }

    fn series_with_material(material: i64) -> MockSeriesRepository {
        let mut mock = MockSeriesRepository::new();
        mock.expect_find_by_id().returning(move |id| {
            let now = Utc::now();
            Ok(Some(Series {
                id,
                name: "Aero".into(),
                description: String::new(),
                pdf_url: "aero.pdf".into(),
                frame_material_id: material,
                frame_material_name: "Titanium".into(),
                is_new_design: false,
                created_at: now,
                updated_at: now,
            }))
        });
        mock
    }

    fn product(id: i64, images: &[&str]) -> Product {
        let now = Utc::now();
        Product {
            id,
            model_no: "AR-100".into(),
            item_code: Some("IC-1".into()),
            title: "Aero round".into(),
            gender: None,
            lens_width: 50.0,
            nose_bridge: 20.0,
            temple_length: 145.0,
            sku_count: 4,
            series_id: Some(7),
            series_name: "Aero".into(),
            category_id: 3,
            category_name: "c3".into(),
            brand_id: None,
            brand_name: String::new(),
            frame_material_id: 2,
            frame_material_name: "Titanium".into(),
            description: String::new(),
            image_urls: images.iter().map(|s| s.to_string()).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    fn new_product(series_id: Option<i64>, material: i64) -> NewProduct {
        NewProduct {
            model_no: " AR-100 ".into(),
            item_code: Some("  ".into()),
            title: "Aero round".into(),
            gender: None,
            lens_width: 50.0,
            nose_bridge: 20.0,
            temple_length: 145.0,
            sku_count: 4,
            series_id,
            category_id: 3,
            brand_id: None,
            frame_material_id: material,
            description: String::new(),
            image_urls: vec!["https://cdn.example.com/images/a1.jpg".into(), "b2.jpg".into()],
        }
    }

    #[tokio::test]
    async fn test_create_stores_file_names_and_returns_urls() {
        let mut products = MockProductRepository::new();
        products.expect_create()
            .withf(|p| p.model_no == "AR-100" && p.item_code.is_none() && p.image_urls == ["a1.jpg", "b2.jpg"])
            .returning(|_| Ok(product(12, &["a1.jpg", "b2.jpg"])));
        products.expect_find_by_id()
            .with(eq(12))
            .returning(|id| Ok(Some(product(id, &["a1.jpg", "b2.jpg"]))));

        let detail = service(products, series_with_material(2), categories())
            .create(new_product(Some(7), 2))
            .await
            .unwrap();
        assert_eq!(detail.category_path, [1, 2, 3]);
        assert_eq!(detail.product.image_urls[0], "https://cdn.example.com/images/a1.jpg");
    }

    #[tokio::test]
    async fn test_material_must_match_series() {
        let mut products = MockProductRepository::new();
        products.expect_create().never();
        let err = service(products, series_with_material(5), categories())
            .create(new_product(Some(7), 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(ref m) if m.contains("series 7")));
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let mut products = MockProductRepository::new();
        products.expect_create().never();
        let err = service(products, MockSeriesRepository::new(), categories())
            .create(NewProduct { category_id: 40, ..new_product(None, 2) })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReferenceNotFound(ref d) if d == "category 40"));
    }

    #[tokio::test]
    async fn test_create_requires_an_image() {
        let err = service(MockProductRepository::new(), MockSeriesRepository::new(), MockCategoryRepository::new())
            .create(NewProduct { image_urls: Vec::new(), ..new_product(None, 2) })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_strips_deleted_urls_to_file_names() {
        let mut products = MockProductRepository::new();
        products.expect_update()
            .withf(|u| u.deleted_image_urls == ["a1.jpg"] && u.image_urls == ["c3.jpg"])
            .returning(|u| Ok(Some(product(u.id, &["b2.jpg", "c3.jpg"]))));
        products.expect_find_by_id().returning(|id| Ok(Some(product(id, &["b2.jpg", "c3.jpg"]))));

        let detail = service(products, MockSeriesRepository::new(), categories())
            .update(ProductUpdate {
                id: 12,
                model_no: "AR-100".into(),
                item_code: None,
                title: "Aero round".into(),
                gender: Some("unisex".into()),
                lens_width: 50.0,
                nose_bridge: 20.0,
                temple_length: 145.0,
                sku_count: 4,
                series_id: None,
                category_id: 3,
                brand_id: None,
                frame_material_id: 2,
                description: String::new(),
                image_urls: vec!["/static/images/c3.jpg".into()],
                deleted_image_urls: vec!["https://cdn.example.com/images/a1.jpg".into()],
            })
            .await
            .unwrap();
        assert_eq!(detail.product.image_urls.len(), 2);
    }

    #[tokio::test]
    async fn test_page_resolves_urls() {
        let mut products = MockProductRepository::new();
        products.expect_list_page()
            .with(eq("AR"), eq(Pagination::new(1, 10)))
            .returning(|_, _| Ok((vec![product(1, &["x.jpg"])], 1)));
        let page = service(products, MockSeriesRepository::new(), MockCategoryRepository::new())
            .page(" AR ", Pagination::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.items[0].image_urls, ["https://cdn.example.com/images/x.jpg"]);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let mut products = MockProductRepository::new();
        products.expect_find_by_id().returning(|_| Ok(None));
        let err = service(products, MockSeriesRepository::new(), MockCategoryRepository::new())
            .get(3)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(3)));
    }
}
