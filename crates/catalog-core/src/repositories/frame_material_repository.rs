//! Frame material repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{FrameMaterial, FrameMaterialUpdate, NewFrameMaterial};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait FrameMaterialRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<FrameMaterial>, DomainError>;
    /// Newest first; `query` matches the name.
    async fn list_page(&self, query: &str, pagination: Pagination)
        -> Result<(Vec<FrameMaterial>, u64), DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<FrameMaterial>, DomainError>;
    async fn create(&self, material: &NewFrameMaterial) -> Result<FrameMaterial, DomainError>;
    async fn update(&self, update: &FrameMaterialUpdate) -> Result<Option<FrameMaterial>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError>;
}
