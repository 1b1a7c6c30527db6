//! Storefront role repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{NewRole, Role, RoleUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Ordered by `sort`, then `id`.
    async fn list_all(&self) -> Result<Vec<Role>, DomainError>;
    /// `query` matches name or code.
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Role>, u64), DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, DomainError>;
    /// A role with the same name or code other than `exclude_id`.
    async fn find_conflict(&self, name: &str, code: &str, exclude_id: Option<i64>)
        -> Result<Option<Role>, DomainError>;
    async fn create(&self, role: &NewRole) -> Result<Role, DomainError>;
    async fn update(&self, update: &RoleUpdate) -> Result<Option<Role>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
