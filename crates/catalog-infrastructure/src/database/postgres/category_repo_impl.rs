// ============================================================================
// Catalog Infrastructure - PostgreSQL Category Repository
// File: crates/catalog-infrastructure/src/database/postgres/category_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{Category, CategoryUpdate, NewCategory};
use catalog_core::error::DomainError;
use catalog_core::repositories::CategoryRepository;

use super::{db_error, is_unique_violation};

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    parent_id: i64,
    name: String,
    slug: String,
    description: String,
    display_order: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            parent_id: row.parent_id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn write_error(name: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::CategoryNameAlreadyExists(name.to_string())
        } else {
            error!("Database error writing category: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_ordered(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name, slug, description, display_order, created_at, updated_at
            FROM categories
            WHERE deleted_at IS NULL
            ORDER BY display_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing categories"))?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name, slug, description, display_order, created_at, updated_at
            FROM categories
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding category by id"))?;

        Ok(row.map(Category::from))
    }

    async fn find_by_name_and_parent(&self, name: &str, parent_id: i64) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name, slug, description, display_order, created_at, updated_at
            FROM categories
            WHERE name = $1 AND parent_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(name)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding category by name"))?;

        Ok(row.map(Category::from))
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        let row: CategoryRow = sqlx::query_as(
            r#"
            INSERT INTO categories (parent_id, name, slug, description, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, parent_id, name, slug, description, display_order, created_at, updated_at
            "#,
        )
        .bind(category.parent_id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(category.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(&category.name))?;

        info!("Category row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, update: &CategoryUpdate) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            UPDATE categories
            SET parent_id = $2,
                name = $3,
                slug = $4,
                description = $5,
                display_order = $6,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, parent_id, name, slug, description, display_order, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(update.parent_id)
        .bind(&update.name)
        .bind(&update.slug)
        .bind(&update.description)
        .bind(update.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(&update.name))?;

        Ok(row.map(Category::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("deleting category"))?;

        Ok(result.rows_affected() > 0)
    }
}
