// ============================================================================
// Catalog Core - Brand Service
// File: crates/catalog-core/src/services/brand_service.rs
// ============================================================================

use std::sync::Arc;

use catalog_shared::{Page, Pagination};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{Brand, BrandUpdate, NewBrand};
use crate::error::DomainError;
use crate::repositories::BrandRepository;

pub struct BrandService<R: BrandRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: BrandRepository + ?Sized> BrandService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Brand>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<Brand>, DomainError> {
        let (items, total) = self.repo.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<Brand, DomainError> {
        self.repo.find_by_id(id).await?.ok_or(DomainError::BrandNotFound(id))
    }

    pub async fn create(&self, input: NewBrand) -> Result<Brand, DomainError> {
        let input = NewBrand {
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
        };
        input.validate()?;
        let created = self.repo.create(&input).await?;
        info!(id = created.id, name = %created.name, "brand created");
        Ok(created)
    }

    pub async fn update(&self, input: BrandUpdate) -> Result<Brand, DomainError> {
        let input = BrandUpdate {
            id: input.id,
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
        };
        input.validate()?;
        let updated = self
            .repo
            .update(&input)
            .await?
            .ok_or(DomainError::BrandNotFound(input.id))?;
        info!(id = updated.id, "brand updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::BrandNotFound(id));
        }
        info!(id, "brand deleted");
        Ok(())
    }

    /// Deletes every listed brand and returns how many rows were removed.
    pub async fn delete_batch(&self, ids: &[i64]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            warn!("batch delete called without ids");
            return Err(DomainError::ValidationError("ids: at least one id is required".into()));
        }
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        let removed = self.repo.delete_many(&ids).await?;
        info!(requested = ids.len(), removed, "brands deleted");
        Ok(removed)
    }
}
