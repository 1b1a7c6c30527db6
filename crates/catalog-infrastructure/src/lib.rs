//! # Catalog Infrastructure
//! 
//! PostgreSQL adapters for the catalog repository traits.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgBrandRepository, PgCatalogRepository, PgCategoryRepository, PgCustomerRepository,
    PgFrameMaterialRepository, PgMenuRepository, PgPermissionRepository, PgProductRepository,
    PgRoleRepository, PgSeriesRepository, PgSysRoleRepository, PgSysUserRepository,
};
