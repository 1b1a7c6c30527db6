// ============================================================================
// Catalog Infrastructure - PostgreSQL Storefront Role Repository
// File: crates/catalog-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{NewRole, Role, RoleUpdate};
use catalog_core::error::DomainError;
use catalog_core::repositories::RoleRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_unique_violation};

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    code: String,
    status: i16,
    sort: i32,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            code: row.code,
            status: row.status,
            sort: row.sort,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn write_error(code: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::RoleAlreadyExists(code.to_string())
        } else {
            error!("Database error writing role: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn list_all(&self) -> Result<Vec<Role>, DomainError> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, code, status, sort, description, created_at, updated_at
            FROM roles
            ORDER BY sort, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing roles"))?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Role>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE name ILIKE $1 OR code ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting roles"))?;

        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, code, status, sort, description, created_at, updated_at
            FROM roles
            WHERE name ILIKE $1 OR code ILIKE $1
            ORDER BY sort, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("paging roles"))?;

        Ok((rows.into_iter().map(Role::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            "SELECT id, name, code, status, sort, description, created_at, updated_at FROM roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding role by id"))?;

        Ok(row.map(Role::from))
    }

    async fn find_conflict(&self, name: &str, code: &str, exclude_id: Option<i64>) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, code, status, sort, description, created_at, updated_at
            FROM roles
            WHERE (name = $1 OR code = $2)
              AND ($3::BIGINT IS NULL OR id <> $3)
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("checking role conflicts"))?;

        Ok(row.map(Role::from))
    }

    async fn create(&self, role: &NewRole) -> Result<Role, DomainError> {
        let row: RoleRow = sqlx::query_as(
            r#"
            INSERT INTO roles (name, code, status, sort, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, code, status, sort, description, created_at, updated_at
            "#,
        )
        .bind(&role.name)
        .bind(&role.code)
        .bind(role.status)
        .bind(role.sort)
        .bind(&role.description)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(&role.code))?;

        info!("Role row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, update: &RoleUpdate) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            UPDATE roles
            SET name = $2, code = $3, status = $4, sort = $5, description = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, code, status, sort, description, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(&update.name)
        .bind(&update.code)
        .bind(update.status)
        .bind(update.sort)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(&update.code))?;

        Ok(row.map(Role::from))
    }

    /// Customers holding the role fall back to no role.
    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting role"))?;

        Ok(result.rows_affected() > 0)
    }
}
