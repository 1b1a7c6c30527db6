//! Permission repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{NewPermission, Permission, PermissionUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Every live permission, ordered by `id`.
    async fn list_all(&self) -> Result<Vec<Permission>, DomainError>;
    /// Newest first; `query` matches name or route. Returns the page and the matching total.
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Permission>, u64), DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Permission>, DomainError>;
    /// A row with the same name, or the same route and method, other than `exclude_id`.
    async fn find_conflict(
        &self,
        name: &str,
        route: &str,
        method: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Permission>, DomainError>;
    async fn create(&self, permission: &NewPermission) -> Result<Permission, DomainError>;
    async fn update(&self, update: &PermissionUpdate) -> Result<Option<Permission>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    /// The subset of `ids` naming live permissions.
    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, DomainError>;
}
