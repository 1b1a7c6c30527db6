// ============================================================================
// Catalog Core - Storefront Role Service
// File: crates/catalog-core/src/services/role_service.rs
// ============================================================================

use std::sync::Arc;

use catalog_shared::{Page, Pagination};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewRole, Role, RoleUpdate};
use crate::error::DomainError;
use crate::repositories::RoleRepository;

pub struct RoleService<R: RoleRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: RoleRepository + ?Sized> RoleService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Role>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<Role>, DomainError> {
        let (items, total) = self.repo.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<Role, DomainError> {
        self.repo.find_by_id(id).await?.ok_or(DomainError::RoleNotFound(id))
    }

    pub async fn create(&self, input: NewRole) -> Result<Role, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_unique(&input.name, &input.code, None).await?;

        let created = self.repo.create(&input).await?;
        info!(id = created.id, code = %created.code, "role created");
        Ok(created)
    }

    pub async fn update(&self, input: RoleUpdate) -> Result<Role, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_unique(&input.name, &input.code, Some(input.id)).await?;

        let updated = self
            .repo
            .update(&input)
            .await?
            .ok_or(DomainError::RoleNotFound(input.id))?;
        info!(id = updated.id, enabled = updated.is_enabled(), "role updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::RoleNotFound(id));
        }
        info!(id, "role deleted");
        Ok(())
    }

    async fn ensure_unique(&self, name: &str, code: &str, exclude_id: Option<i64>) -> Result<(), DomainError> {
        if let Some(existing) = self.repo.find_conflict(name, code, exclude_id).await? {
            warn!(existing = existing.id, name, code, "duplicate role");
            let taken = if existing.code == code { code } else { name };
            return Err(DomainError::RoleAlreadyExists(taken.to_string()));
        }
        Ok(())
    }
}
