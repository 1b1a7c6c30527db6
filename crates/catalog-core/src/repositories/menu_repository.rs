//! Menu repository trait (port)

use async_trait::async_trait;
use crate::domain::Menu;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Distinct menus granted to the admin through their roles, `order` descending.
    async fn list_for_sys_user(&self, sys_user_id: i64) -> Result<Vec<Menu>, DomainError>;
    /// Every live menu, `order` descending.
    async fn list_all(&self) -> Result<Vec<Menu>, DomainError>;
    /// The subset of `ids` naming live menus.
    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, DomainError>;
}
