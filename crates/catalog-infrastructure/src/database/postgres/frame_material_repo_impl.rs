// ============================================================================
// Catalog Infrastructure - PostgreSQL Frame Material Repository
// File: crates/catalog-infrastructure/src/database/postgres/frame_material_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{FrameMaterial, FrameMaterialUpdate, NewFrameMaterial};
use catalog_core::error::DomainError;
use catalog_core::repositories::FrameMaterialRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_unique_violation};

pub struct PgFrameMaterialRepository {
    pool: PgPool,
}

impl PgFrameMaterialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FrameMaterialRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FrameMaterialRow> for FrameMaterial {
    fn from(row: FrameMaterialRow) -> Self {
        FrameMaterial {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn write_error(name: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::FrameMaterialNameAlreadyExists(name.to_string())
        } else {
            error!("Database error writing frame material: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl FrameMaterialRepository for PgFrameMaterialRepository {
    async fn list_all(&self) -> Result<Vec<FrameMaterial>, DomainError> {
        let rows: Vec<FrameMaterialRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM frame_materials
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing frame materials"))?;

        Ok(rows.into_iter().map(FrameMaterial::from).collect())
    }

    async fn list_page(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> Result<(Vec<FrameMaterial>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM frame_materials WHERE deleted_at IS NULL AND name ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting frame materials"))?;

        let rows: Vec<FrameMaterialRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM frame_materials
            WHERE deleted_at IS NULL AND name ILIKE $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("paging frame materials"))?;

        Ok((rows.into_iter().map(FrameMaterial::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FrameMaterial>, DomainError> {
        let row: Option<FrameMaterialRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM frame_materials
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding frame material by id"))?;

        Ok(row.map(FrameMaterial::from))
    }

    async fn create(&self, material: &NewFrameMaterial) -> Result<FrameMaterial, DomainError> {
        let row: FrameMaterialRow = sqlx::query_as(
            r#"
            INSERT INTO frame_materials (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&material.name)
        .bind(&material.description)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(&material.name))?;

        info!("Frame material row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, update: &FrameMaterialUpdate) -> Result<Option<FrameMaterial>, DomainError> {
        let row: Option<FrameMaterialRow> = sqlx::query_as(
            r#"
            UPDATE frame_materials
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(&update.name)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(&update.name))?;

        Ok(row.map(FrameMaterial::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE frame_materials SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("deleting frame material"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE frame_materials SET deleted_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(db_error("batch deleting frame materials"))?;

        Ok(result.rows_affected())
    }
}
