//! Category repository trait (port)

use async_trait::async_trait;
use crate::domain::{Category, CategoryUpdate, NewCategory};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every live category, ordered by `display_order` then `id`.
    async fn list_ordered(&self) -> Result<Vec<Category>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError>;
    async fn find_by_name_and_parent(&self, name: &str, parent_id: i64) -> Result<Option<Category>, DomainError>;
    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError>;
    /// `None` when no live row has `update.id`.
    async fn update(&self, update: &CategoryUpdate) -> Result<Option<Category>, DomainError>;
    /// Soft delete; `false` when nothing was removed.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
