// ============================================================================
// Catalog Infrastructure - PostgreSQL Permission Repository
// File: crates/catalog-infrastructure/src/database/postgres/permission_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;

use catalog_core::domain::{NewPermission, Permission, PermissionUpdate};
use catalog_core::error::DomainError;
use catalog_core::repositories::PermissionRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_unique_violation};

pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: i64,
    parent_id: i64,
    name: String,
    description: String,
    route: String,
    method: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Permission {
            id: row.id,
            parent_id: row.parent_id,
            name: row.name,
            description: row.description,
            route: row.route,
            method: row.method,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn write_error(name: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::PermissionAlreadyExists(name.to_string())
        } else {
            error!("Database error writing permission: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn list_all(&self) -> Result<Vec<Permission>, DomainError> {
        let rows: Vec<PermissionRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name, description, route, method, created_at, updated_at
            FROM sys_permissions
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing permissions"))?;

        Ok(rows.into_iter().map(Permission::from).collect())
    }

    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Permission>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM sys_permissions
            WHERE deleted_at IS NULL AND (name ILIKE $1 OR route ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting permissions"))?;

        let rows: Vec<PermissionRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name, description, route, method, created_at, updated_at
            FROM sys_permissions
            WHERE deleted_at IS NULL AND (name ILIKE $1 OR route ILIKE $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("paging permissions"))?;

        Ok((rows.into_iter().map(Permission::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Permission>, DomainError> {
        let row: Option<PermissionRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name, description, route, method, created_at, updated_at
            FROM sys_permissions
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding permission by id"))?;

        Ok(row.map(Permission::from))
    }

    async fn find_conflict(
        &self,
        name: &str,
        route: &str,
        method: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Permission>, DomainError> {
        let row: Option<PermissionRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name, description, route, method, created_at, updated_at
            FROM sys_permissions
            WHERE deleted_at IS NULL
              AND (name = $1 OR (route = $2 AND method = $3))
              AND ($4::BIGINT IS NULL OR id <> $4)
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(route)
        .bind(method)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("checking permission conflicts"))?;

        Ok(row.map(Permission::from))
    }

    async fn create(&self, permission: &NewPermission) -> Result<Permission, DomainError> {
        let row: PermissionRow = sqlx::query_as(
            r#"
            INSERT INTO sys_permissions (parent_id, name, description, route, method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, parent_id, name, description, route, method, created_at, updated_at
            "#,
        )
        .bind(permission.parent_id)
        .bind(&permission.name)
        .bind(&permission.description)
        .bind(&permission.route)
        .bind(&permission.method)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(&permission.name))?;

        Ok(row.into())
    }

    async fn update(&self, update: &PermissionUpdate) -> Result<Option<Permission>, DomainError> {
        let row: Option<PermissionRow> = sqlx::query_as(
            r#"
            UPDATE sys_permissions
            SET parent_id = $2,
                name = $3,
                description = $4,
                route = $5,
                method = $6,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, parent_id, name, description, route, method, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(update.parent_id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.route)
        .bind(&update.method)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(&update.name))?;

        Ok(row.map(Permission::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE sys_permissions SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting permission"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar("SELECT id FROM sys_permissions WHERE id = ANY($1) AND deleted_at IS NULL ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("checking permission ids"))
    }
}
