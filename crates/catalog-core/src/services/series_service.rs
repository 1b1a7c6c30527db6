// ============================================================================
// Catalog Core - Series Service
// File: crates/catalog-core/src/services/series_service.rs
// ============================================================================

use std::sync::Arc;

use catalog_shared::{Page, Pagination};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewSeries, Series, SeriesUpdate};
use crate::error::DomainError;
use crate::repositories::{FrameMaterialRepository, SeriesRepository};
use crate::services::sys_role_service::dedup;

pub struct SeriesService<S, M>
where
    S: SeriesRepository + ?Sized,
    M: FrameMaterialRepository + ?Sized,
{
    series: Arc<S>,
    materials: Arc<M>,
}

impl<S, M> SeriesService<S, M>
where
    S: SeriesRepository + ?Sized,
    M: FrameMaterialRepository + ?Sized,
{
    pub fn new(series: Arc<S>, materials: Arc<M>) -> Self {
        Self { series, materials }
    }

    pub async fn list_all(&self) -> Result<Vec<Series>, DomainError> {
        self.series.list_all().await
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<Series>, DomainError> {
        let (items, total) = self.series.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<Series, DomainError> {
        self.series.find_by_id(id).await?.ok_or(DomainError::SeriesNotFound(id))
    }

    pub async fn create(&self, input: NewSeries) -> Result<Series, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_material(input.frame_material_id).await?;

        let created = self.series.create(&input).await?;
        info!(id = created.id, name = %created.name, new_design = created.is_new_design, "series created");
        Ok(created)
    }

    pub async fn update(&self, input: SeriesUpdate) -> Result<Series, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_material(input.frame_material_id).await?;

        let updated = self
            .series
            .update(&input)
            .await?
            .ok_or(DomainError::SeriesNotFound(input.id))?;
        info!(id = updated.id, "series updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.series.delete(id).await? {
            return Err(DomainError::SeriesNotFound(id));
        }
        info!(id, "series deleted");
        Ok(())
    }

    pub async fn delete_batch(&self, ids: &[i64]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::ValidationError("ids: at least one id is required".into()));
        }
        let ids = dedup(ids);
        let removed = self.series.delete_many(&ids).await?;
        info!(requested = ids.len(), removed, "series deleted");
        Ok(removed)
    }

    async fn ensure_material(&self, id: i64) -> Result<(), DomainError> {
        if self.materials.find_by_id(id).await?.is_none() {
            warn!(frame_material_id = id, "series references a missing frame material");
            return Err(DomainError::ReferenceNotFound(format!("frame material {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FrameMaterial;
    use crate::repositories::{MockFrameMaterialRepository, MockSeriesRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn series(id: i64, name: &str, material: i64) -> Series {
        let now = Utc::now();
        Series {
            id,
            name: name.into(),
            description: String::new(),
            pdf_url: "https://cdn.example.com/aero.pdf".into(),
            frame_material_id: material,
            frame_material_name: "Titanium".into(),
            is_new_design: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_series(material: i64) -> NewSeries {
        NewSeries {
            name: " Aero ".into(),
            description: String::new(),
            pdf_url: "https://cdn.example.com/aero.pdf".into(),
            frame_material_id: material,
            is_new_design: true,
        }
    }

    fn materials_with(id: i64) -> MockFrameMaterialRepository {
        let mut mock = MockFrameMaterialRepository::new();
        mock.expect_find_by_id().returning(move |wanted| {
            let now = Utc::now();
            Ok((wanted == id).then(|| FrameMaterial {
                id,
                name: "Titanium".into(),
                description: String::new(),
                created_at: now,
                updated_at: now,
            }))
        });
        mock
    }

    #[tokio::test]
    async fn test_create_requires_existing_material() {
        let mut repo = MockSeriesRepository::new();
        repo.expect_create().never();
        let err = SeriesService::new(Arc::new(repo), Arc::new(materials_with(1)))
            .create(new_series(4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReferenceNotFound(ref d) if d == "frame material 4"));
    }

    #[tokio::test]
    async fn test_create_trims_and_saves() {
        let mut repo = MockSeriesRepository::new();
        repo.expect_create()
            .withf(|s| s.name == "Aero" && s.is_new_design)
            .returning(|s| Ok(series(3, &s.name, s.frame_material_id)));
        let created = SeriesService::new(Arc::new(repo), Arc::new(materials_with(1)))
            .create(new_series(1))
            .await
            .unwrap();
        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn test_create_requires_pdf() {
        let service = SeriesService::new(Arc::new(MockSeriesRepository::new()), Arc::new(MockFrameMaterialRepository::new()));
        let err = service
            .create(NewSeries { pdf_url: "  ".into(), ..new_series(1) })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let mut repo = MockSeriesRepository::new();
        repo.expect_find_by_id().with(eq(6)).returning(|_| Ok(None));
        let service = SeriesService::new(Arc::new(repo), Arc::new(MockFrameMaterialRepository::new()));
        assert!(matches!(service.get(6).await, Err(DomainError::SeriesNotFound(6))));
    }
}
