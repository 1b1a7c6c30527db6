//! Product repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{NewProduct, Product, ProductUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Newest first; `query` is a prefix of the item code or model number.
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Product>, u64), DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;
    /// Inserts the product and its image rows in one transaction. Image
    /// entries are stored file names.
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;
    /// Updates the product, drops `deleted_image_urls` and adds `image_urls`
    /// in one transaction.
    async fn update(&self, update: &ProductUpdate) -> Result<Option<Product>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError>;
}
