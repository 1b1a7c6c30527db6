//! Back-office user repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{SysUser, SysUserChanges, SysUserDraft, SysUserSummary};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SysUserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<SysUser>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<SysUser>, DomainError>;
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), DomainError>;
    /// Newest first; `query` matches username or email.
    async fn list_page(&self, query: &str, pagination: Pagination)
        -> Result<(Vec<SysUserSummary>, u64), DomainError>;
    async fn find_summary(&self, id: i64) -> Result<Option<SysUserSummary>, DomainError>;
    /// An account with this username or email other than `exclude_id`.
    async fn find_conflict(
        &self,
        username: &str,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<SysUser>, DomainError>;
    /// Inserts the account and its role assignments in one transaction.
    async fn create(&self, draft: &SysUserDraft) -> Result<SysUser, DomainError>;
    /// Updates the account and replaces its roles in one transaction.
    async fn update(&self, changes: &SysUserChanges) -> Result<Option<SysUser>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
