//! Back-office role repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{NewSysRole, SysRole, SysRoleUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SysRoleRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<SysRole>, DomainError>;
    /// Newest first; `query` matches the name.
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<SysRole>, u64), DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<SysRole>, DomainError>;
    /// A role with this name other than `exclude_id`.
    async fn find_by_name(&self, name: &str, exclude_id: Option<i64>) -> Result<Option<SysRole>, DomainError>;
    async fn create(&self, role: &NewSysRole) -> Result<SysRole, DomainError>;
    async fn update(&self, update: &SysRoleUpdate) -> Result<Option<SysRole>, DomainError>;
    /// Removes the role with its grants and account assignments.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    /// The subset of `ids` naming stored roles.
    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, DomainError>;
    async fn permission_ids(&self, role_id: i64) -> Result<Vec<i64>, DomainError>;
    async fn menu_ids(&self, role_id: i64) -> Result<Vec<i64>, DomainError>;
    /// Replaces the role's permission grants in one transaction.
    async fn replace_permissions(&self, role_id: i64, permission_ids: &[i64]) -> Result<(), DomainError>;
    /// Replaces the role's menu grants in one transaction.
    async fn replace_menus(&self, role_id: i64, menu_ids: &[i64]) -> Result<(), DomainError>;
}
