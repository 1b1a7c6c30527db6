//! Series repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{NewSeries, Series, SeriesUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SeriesRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Series>, DomainError>;
    /// Newest first; `query` matches the name.
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Series>, u64), DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Series>, DomainError>;
    async fn create(&self, series: &NewSeries) -> Result<Series, DomainError>;
    async fn update(&self, update: &SeriesUpdate) -> Result<Option<Series>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError>;
}
