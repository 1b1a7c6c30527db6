// ============================================================================
// Catalog Infrastructure - PostgreSQL Back-office Role Repository
// File: crates/catalog-infrastructure/src/database/postgres/sys_role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{NewSysRole, SysRole, SysRoleUpdate};
use catalog_core::error::DomainError;
use catalog_core::repositories::SysRoleRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_foreign_key_violation, is_unique_violation};

pub struct PgSysRoleRepository {
    pool: PgPool,
}

impl PgSysRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SysRoleRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SysRoleRow> for SysRole {
    fn from(row: SysRoleRow) -> Self {
        SysRole {
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
            DomainError::SysRoleNameAlreadyExists(name.to_string())
        } else {
            error!("Database error writing sys role: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

fn grant_error(kind: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        if is_foreign_key_violation(&e) {
            DomainError::ReferenceNotFound(kind.to_string())
        } else {
            error!("Database error granting {}: {}", kind, e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl SysRoleRepository for PgSysRoleRepository {
    async fn list_all(&self) -> Result<Vec<SysRole>, DomainError> {
        let rows: Vec<SysRoleRow> = sqlx::query_as(
            "SELECT id, name, description, created_at, updated_at FROM sys_roles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing sys roles"))?;

        Ok(rows.into_iter().map(SysRole::from).collect())
    }

    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<SysRole>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sys_roles WHERE name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting sys roles"))?;

        let rows: Vec<SysRoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM sys_roles
            WHERE name ILIKE $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("paging sys roles"))?;

        Ok((rows.into_iter().map(SysRole::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SysRole>, DomainError> {
        let row: Option<SysRoleRow> = sqlx::query_as(
            "SELECT id, name, description, created_at, updated_at FROM sys_roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding sys role by id"))?;

        Ok(row.map(SysRole::from))
    }

    async fn find_by_name(&self, name: &str, exclude_id: Option<i64>) -> Result<Option<SysRole>, DomainError> {
        let row: Option<SysRoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM sys_roles
            WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding sys role by name"))?;

        Ok(row.map(SysRole::from))
    }

    async fn create(&self, role: &NewSysRole) -> Result<SysRole, DomainError> {
        let row: SysRoleRow = sqlx::query_as(
            r#"
            INSERT INTO sys_roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&role.name)
        .bind(&role.description)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(&role.name))?;

        info!("Sys role row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, update: &SysRoleUpdate) -> Result<Option<SysRole>, DomainError> {
        let row: Option<SysRoleRow> = sqlx::query_as(
            r#"
            UPDATE sys_roles
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(&update.name)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(&update.name))?;

        Ok(row.map(SysRole::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        // Grants and account assignments cascade.
        let result = sqlx::query("DELETE FROM sys_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting sys role"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar("SELECT id FROM sys_roles WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("checking sys role ids"))
    }

    async fn permission_ids(&self, role_id: i64) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT rp.sys_permission_id
            FROM sys_role_permissions rp
            INNER JOIN sys_permissions p ON p.id = rp.sys_permission_id
            WHERE rp.sys_role_id = $1 AND p.deleted_at IS NULL
            ORDER BY rp.sys_permission_id
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading sys role permissions"))
    }

    async fn menu_ids(&self, role_id: i64) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT rm.sys_menu_id
            FROM sys_role_menus rm
            INNER JOIN sys_menus m ON m.id = rm.sys_menu_id
            WHERE rm.sys_role_id = $1 AND m.deleted_at IS NULL
            ORDER BY rm.sys_menu_id
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading sys role menus"))
    }

    async fn replace_permissions(&self, role_id: i64, permission_ids: &[i64]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting permission grant"))?;

        sqlx::query("DELETE FROM sys_role_permissions WHERE sys_role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("clearing sys role permissions"))?;

        sqlx::query(
            r#"
            INSERT INTO sys_role_permissions (sys_role_id, sys_permission_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(&mut *tx)
        .await
        .map_err(grant_error("permission"))?;

        tx.commit().await.map_err(db_error("committing permission grant"))?;
        info!(role_id, granted = permission_ids.len(), "Sys role permissions stored");
        Ok(())
    }

    async fn replace_menus(&self, role_id: i64, menu_ids: &[i64]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting menu grant"))?;

        sqlx::query("DELETE FROM sys_role_menus WHERE sys_role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("clearing sys role menus"))?;

        sqlx::query(
            r#"
            INSERT INTO sys_role_menus (sys_role_id, sys_menu_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(role_id)
        .bind(menu_ids)
        .execute(&mut *tx)
        .await
        .map_err(grant_error("menu"))?;

        tx.commit().await.map_err(db_error("committing menu grant"))?;
        info!(role_id, granted = menu_ids.len(), "Sys role menus stored");
        Ok(())
    }
}
