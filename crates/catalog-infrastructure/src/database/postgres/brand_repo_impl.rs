// ============================================================================
// Catalog Infrastructure - PostgreSQL Brand Repository
// File: crates/catalog-infrastructure/src/database/postgres/brand_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{Brand, BrandUpdate, NewBrand};
use catalog_core::error::DomainError;
use catalog_core::repositories::BrandRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_unique_violation};

pub struct PgBrandRepository {
    pool: PgPool,
}

impl PgBrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BrandRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand {
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
            DomainError::BrandNameAlreadyExists(name.to_string())
        } else {
            error!("Database error writing brand: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn list_all(&self) -> Result<Vec<Brand>, DomainError> {
        let rows: Vec<BrandRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM brands
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing brands"))?;

        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Brand>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands WHERE deleted_at IS NULL AND name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting brands"))?;

        let rows: Vec<BrandRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM brands
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
        .map_err(db_error("paging brands"))?;

        Ok((rows.into_iter().map(Brand::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Brand>, DomainError> {
        let row: Option<BrandRow> = sqlx::query_as(
            "SELECT id, name, description, created_at, updated_at FROM brands WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding brand by id"))?;

        Ok(row.map(Brand::from))
    }

    async fn create(&self, brand: &NewBrand) -> Result<Brand, DomainError> {
        let row: BrandRow = sqlx::query_as(
            r#"
            INSERT INTO brands (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&brand.name)
        .bind(&brand.description)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(&brand.name))?;

        info!("Brand row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, update: &BrandUpdate) -> Result<Option<Brand>, DomainError> {
        let row: Option<BrandRow> = sqlx::query_as(
            r#"
            UPDATE brands
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

        Ok(row.map(Brand::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE brands SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting brand"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let result = sqlx::query("UPDATE brands SET deleted_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("batch deleting brands"))?;

        Ok(result.rows_affected())
    }
}
