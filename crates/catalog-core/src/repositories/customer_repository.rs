//! Storefront customer repository trait (port)

use async_trait::async_trait;
use catalog_shared::Pagination;
use crate::domain::{Customer, CustomerChanges, CustomerDraft};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Customer>, DomainError>;
    async fn create(&self, draft: &CustomerDraft) -> Result<Customer, DomainError>;
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), DomainError>;
    /// Newest first; `query` matches username or email.
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Customer>, u64), DomainError>;
    async fn update(&self, changes: &CustomerChanges) -> Result<Option<Customer>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
