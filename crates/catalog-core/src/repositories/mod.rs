//! Repository traits (ports)

pub mod brand_repository;
pub mod catalog_repository;
pub mod category_repository;
pub mod customer_repository;
pub mod frame_material_repository;
pub mod menu_repository;
pub mod permission_repository;
pub mod product_repository;
pub mod role_repository;
pub mod series_repository;
pub mod sys_role_repository;
pub mod sys_user_repository;

pub use brand_repository::BrandRepository;
pub use catalog_repository::CatalogRepository;
pub use category_repository::CategoryRepository;
pub use customer_repository::CustomerRepository;
pub use frame_material_repository::FrameMaterialRepository;
pub use menu_repository::MenuRepository;
pub use permission_repository::PermissionRepository;
pub use product_repository::ProductRepository;
pub use role_repository::RoleRepository;
pub use series_repository::SeriesRepository;
pub use sys_role_repository::SysRoleRepository;
pub use sys_user_repository::SysUserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use brand_repository::MockBrandRepository;
#[cfg(any(test, feature = "mocks"))]
pub use catalog_repository::MockCatalogRepository;
#[cfg(any(test, feature = "mocks"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "mocks"))]
pub use customer_repository::MockCustomerRepository;
#[cfg(any(test, feature = "mocks"))]
pub use frame_material_repository::MockFrameMaterialRepository;
#[cfg(any(test, feature = "mocks"))]
pub use menu_repository::MockMenuRepository;
#[cfg(any(test, feature = "mocks"))]
pub use permission_repository::MockPermissionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "mocks"))]
pub use role_repository::MockRoleRepository;
#[cfg(any(test, feature = "mocks"))]
pub use series_repository::MockSeriesRepository;
#[cfg(any(test, feature = "mocks"))]
pub use sys_role_repository::MockSysRoleRepository;
#[cfg(any(test, feature = "mocks"))]
pub use sys_user_repository::MockSysUserRepository;
