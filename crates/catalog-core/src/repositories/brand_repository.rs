//! Brand repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{Brand, BrandUpdate, NewBrand};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Brand>, DomainError>;
    /// Newest first; `query` matches the name.
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Brand>, u64), DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Brand>, DomainError>;
    async fn create(&self, brand: &NewBrand) -> Result<Brand, DomainError>;
    async fn update(&self, update: &BrandUpdate) -> Result<Option<Brand>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    /// Returns how many rows were removed.
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError>;
}
