// ============================================================================
// Catalog Infrastructure - PostgreSQL Menu Repository
// File: crates/catalog-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use catalog_core::domain::Menu;
use catalog_core::error::DomainError;
use catalog_core::repositories::MenuRepository;

use super::db_error;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuRow {
    id: i64,
    parent_id: Option<i64>,
    label: String,
    link_to: String,
    icon: String,
    order: i32,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            parent_id: row.parent_id,
            label: row.label,
            link_to: row.link_to,
            icon: row.icon,
            order: row.order,
        }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn list_for_sys_user(&self, sys_user_id: i64) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT m.id, m.parent_id, m.label, m.link_to, m.icon, m."order"
            FROM sys_menus m
            INNER JOIN sys_role_menus rm ON m.id = rm.sys_menu_id
            INNER JOIN sys_roles r ON rm.sys_role_id = r.id
            INNER JOIN sys_user_role ur ON r.id = ur.sys_role_id
            WHERE ur.sys_user_id = $1
              AND m.deleted_at IS NULL
            ORDER BY m."order" DESC, m.id
            "#,
        )
        .bind(sys_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading menus for sys user"))?;

        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, label, link_to, icon, "order"
            FROM sys_menus
            WHERE deleted_at IS NULL
            ORDER BY "order" DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing menus"))?;

        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar("SELECT id FROM sys_menus WHERE id = ANY($1) AND deleted_at IS NULL ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("checking menu ids"))
    }
}
