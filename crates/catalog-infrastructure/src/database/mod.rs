//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use postgres::{
    PgBrandRepository, PgCatalogRepository, PgCategoryRepository, PgCustomerRepository,
    PgFrameMaterialRepository, PgMenuRepository, PgPermissionRepository, PgProductRepository,
    PgRoleRepository, PgSeriesRepository, PgSysRoleRepository, PgSysUserRepository,
};
