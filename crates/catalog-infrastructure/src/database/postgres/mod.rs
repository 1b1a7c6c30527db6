//! PostgreSQL repository implementations

pub mod brand_repo_impl;
pub mod catalog_repo_impl;
pub mod category_repo_impl;
pub mod customer_repo_impl;
pub mod frame_material_repo_impl;
pub mod menu_repo_impl;
pub mod permission_repo_impl;
pub mod product_repo_impl;
pub mod role_repo_impl;
pub mod series_repo_impl;
pub mod sys_role_repo_impl;
pub mod sys_user_repo_impl;

pub use brand_repo_impl::PgBrandRepository;
pub use catalog_repo_impl::PgCatalogRepository;
pub use category_repo_impl::PgCategoryRepository;
pub use customer_repo_impl::PgCustomerRepository;
pub use frame_material_repo_impl::PgFrameMaterialRepository;
pub use menu_repo_impl::PgMenuRepository;
pub use permission_repo_impl::PgPermissionRepository;
pub use product_repo_impl::PgProductRepository;
pub use role_repo_impl::PgRoleRepository;
pub use series_repo_impl::PgSeriesRepository;
pub use sys_role_repo_impl::PgSysRoleRepository;
pub use sys_user_repo_impl::PgSysUserRepository;

use catalog_core::error::DomainError;
use tracing::error;

/// Logs a storage failure and maps it to `DomainError::DatabaseError`.
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false)
}

fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `ILIKE` pattern matching `query` anywhere; `%` and `_` are taken literally.
pub(crate) fn contains_pattern(query: &str) -> String {
    format!("%{}%", escape_like(query))
}

/// `ILIKE` pattern matching values that start with `query`.
pub(crate) fn prefix_pattern(query: &str) -> String {
    format!("{}%", escape_like(query))
}
