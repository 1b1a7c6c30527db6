// ============================================================================
// Catalog Core - Frame Material Service
// File: crates/catalog-core/src/services/frame_material_service.rs
// ============================================================================

use std::sync::Arc;

use catalog_shared::{Page, Pagination};
use tracing::info;
use validator::Validate;

use crate::domain::{FrameMaterial, FrameMaterialUpdate, NewFrameMaterial};
use crate::error::DomainError;
use crate::repositories::FrameMaterialRepository;
use crate::services::sys_role_service::dedup;

pub struct FrameMaterialService<R: FrameMaterialRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: FrameMaterialRepository + ?Sized> FrameMaterialService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<FrameMaterial>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<FrameMaterial>, DomainError> {
        let (items, total) = self.repo.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<FrameMaterial, DomainError> {
        self.repo.find_by_id(id).await?.ok_or(DomainError::FrameMaterialNotFound(id))
    }

    pub async fn create(&self, input: NewFrameMaterial) -> Result<FrameMaterial, DomainError> {
        let input = NewFrameMaterial {
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
        };
        input.validate()?;
        let created = self.repo.create(&input).await?;
        info!(id = created.id, name = %created.name, "frame material created");
        Ok(created)
    }

    pub async fn update(&self, input: FrameMaterialUpdate) -> Result<FrameMaterial, DomainError> {
        let input = FrameMaterialUpdate {
            id: input.id,
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
        };
        input.validate()?;
        let updated = self
            .repo
            .update(&input)
            .await?
            .ok_or(DomainError::FrameMaterialNotFound(input.id))?;
        info!(id = updated.id, "frame material updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::FrameMaterialNotFound(id));
        }
        info!(id, "frame material deleted");
        Ok(())
    }

    pub async fn delete_batch(&self, ids: &[i64]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::ValidationError("ids: at least one id is required".into()));
        }
        let ids = dedup(ids);
        let removed = self.repo.delete_many(&ids).await?;
        info!(requested = ids.len(), removed, "frame materials deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockFrameMaterialRepository;
    use chrono::Utc;

    fn material(id: i64, name: &str) -> FrameMaterial {
        let now = Utc::now();
        FrameMaterial { id, name: name.into(), description: String::new(), created_at: now, updated_at: now }
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let mut mock = MockFrameMaterialRepository::new();
        mock.expect_create()
            .withf(|m| m.name == "Titanium")
            .returning(|m| Ok(material(2, &m.name)));
        let created = FrameMaterialService::new(Arc::new(mock))
            .create(NewFrameMaterial { name: " Titanium ".into(), description: String::new() })
            .await
            .unwrap();
        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let mut mock = MockFrameMaterialRepository::new();
        mock.expect_update().returning(|_| Ok(None));
        let err = FrameMaterialService::new(Arc::new(mock))
            .update(FrameMaterialUpdate { id: 9, name: "Acetate".into(), description: String::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::FrameMaterialNotFound(9)));
    }

    #[tokio::test]
    async fn test_delete_batch_dedups() {
        let mut mock = MockFrameMaterialRepository::new();
        mock.expect_delete_many()
            .withf(|ids| ids == [1, 4])
            .returning(|ids| Ok(ids.len() as u64));
        let removed = FrameMaterialService::new(Arc::new(mock)).delete_batch(&[4, 1, 4]).await.unwrap();
        assert_eq!(removed, 2);
    }
}
