// ============================================================================
// Catalog Infrastructure - PostgreSQL Back-office User Repository
// File: crates/catalog-infrastructure/src/database/postgres/sys_user_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{error, info};

use catalog_core::domain::{SysRoleRef, SysUser, SysUserChanges, SysUserDraft, SysUserSummary};
use catalog_core::error::DomainError;
use catalog_core::repositories::SysUserRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_foreign_key_violation, is_unique_violation};

pub struct PgSysUserRepository {
    pool: PgPool,
}

impl PgSysUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SysUserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<SysUserRow> for SysUser {
    fn from(row: SysUserRow) -> Self {
        SysUser {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRoleRow {
    sys_user_id: i64,
    id: i64,
    name: String,
}

impl PgSysUserRepository {
    /// Role references per account id.
    async fn roles_of(&self, user_ids: &[i64]) -> Result<HashMap<i64, Vec<SysRoleRef>>, DomainError> {
        let rows: Vec<UserRoleRow> = sqlx::query_as(
            r#"
            SELECT ur.sys_user_id, r.id, r.name
            FROM sys_user_role ur
            INNER JOIN sys_roles r ON r.id = ur.sys_role_id
            WHERE ur.sys_user_id = ANY($1)
            ORDER BY r.id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading sys user roles"))?;

        let mut roles: HashMap<i64, Vec<SysRoleRef>> = HashMap::new();
        for row in rows {
            roles.entry(row.sys_user_id).or_default().push(SysRoleRef { id: row.id, name: row.name });
        }
        Ok(roles)
    }

    async fn summarize(&self, users: Vec<SysUserRow>) -> Result<Vec<SysUserSummary>, DomainError> {
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        let mut roles = self.roles_of(&ids).await?;
        Ok(users
            .into_iter()
            .map(|u| SysUserSummary {
                roles: roles.remove(&u.id).unwrap_or_default(),
                id: u.id,
                username: u.username,
                email: u.email,
                is_active: u.is_active,
                created_at: u.created_at,
            })
            .collect())
    }
}

async fn assign_roles(conn: &mut PgConnection, user_id: i64, role_ids: &[i64]) -> Result<(), DomainError> {
    sqlx::query("DELETE FROM sys_user_role WHERE sys_user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(db_error("clearing sys user roles"))?;

    sqlx::query("INSERT INTO sys_user_role (sys_user_id, sys_role_id) SELECT $1, UNNEST($2::BIGINT[])")
        .bind(user_id)
        .bind(role_ids)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::ReferenceNotFound("admin role".into())
            } else {
                error!("Database error assigning sys user roles: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;
    Ok(())
}

fn write_error<'a>(username: &'a str, email: &'a str) -> impl Fn(sqlx::Error) -> DomainError + 'a {
    move |e| {
        if is_unique_violation(&e) {
            if e.to_string().contains("email") {
                DomainError::EmailAlreadyExists(email.to_string())
            } else {
                DomainError::UsernameAlreadyExists(username.to_string())
            }
        } else {
            error!("Database error writing sys user: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl SysUserRepository for PgSysUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<SysUser>, DomainError> {
        let row: Option<SysUserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, is_active, created_at
            FROM sys_users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding sys user by id"))?;

        Ok(row.map(SysUser::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<SysUser>, DomainError> {
        let row: Option<SysUserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, is_active, created_at
            FROM sys_users
            WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding sys user by email"))?;

        Ok(row.map(SysUser::from))
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE sys_users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("updating sys user password"))?;

        Ok(())
    }

    async fn list_page(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> Result<(Vec<SysUserSummary>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sys_users WHERE deleted_at IS NULL AND (username ILIKE $1 OR email ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting sys users"))?;

        let rows: Vec<SysUserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, is_active, created_at
            FROM sys_users
            WHERE deleted_at IS NULL AND (username ILIKE $1 OR email ILIKE $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("paging sys users"))?;

        Ok((self.summarize(rows).await?, total.max(0) as u64))
    }

    async fn find_summary(&self, id: i64) -> Result<Option<SysUserSummary>, DomainError> {
        let row: Option<SysUserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, is_active, created_at
            FROM sys_users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding sys user summary"))?;

        match row {
            Some(row) => Ok(self.summarize(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_conflict(
        &self,
        username: &str,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<SysUser>, DomainError> {
        let row: Option<SysUserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, is_active, created_at
            FROM sys_users
            WHERE deleted_at IS NULL
              AND (LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($2))
              AND ($3::BIGINT IS NULL OR id <> $3)
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("checking sys user conflicts"))?;

        Ok(row.map(SysUser::from))
    }

    async fn create(&self, draft: &SysUserDraft) -> Result<SysUser, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting sys user insert"))?;

        let row: SysUserRow = sqlx::query_as(
            r#"
            INSERT INTO sys_users (username, email, password, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password, is_active, created_at
            "#,
        )
        .bind(&draft.username)
        .bind(&draft.email)
        .bind(&draft.password_hash)
        .bind(draft.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error(&draft.username, &draft.email))?;

        assign_roles(&mut tx, row.id, &draft.role_ids).await?;
        tx.commit().await.map_err(db_error("committing sys user insert"))?;

        info!("Sys user created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, changes: &SysUserChanges) -> Result<Option<SysUser>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting sys user update"))?;

        let row: Option<SysUserRow> = sqlx::query_as(
            r#"
            UPDATE sys_users
            SET username = $2, email = $3, password = COALESCE($4, password), is_active = $5,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, username, email, password, is_active, created_at
            "#,
        )
        .bind(changes.id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(changes.is_active)
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_error(&changes.username, &changes.email))?;

        let Some(row) = row else {
            return Ok(None);
        };
        assign_roles(&mut tx, row.id, &changes.role_ids).await?;
        tx.commit().await.map_err(db_error("committing sys user update"))?;

        Ok(Some(row.into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting sys user delete"))?;

        let result = sqlx::query("UPDATE sys_users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("deleting sys user"))?;
        sqlx::query("DELETE FROM sys_user_role WHERE sys_user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("clearing deleted sys user roles"))?;

        tx.commit().await.map_err(db_error("committing sys user delete"))?;
        Ok(result.rows_affected() > 0)
    }
}
