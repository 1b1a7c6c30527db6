//! Domain services (business logic)

pub mod auth_service;
pub mod brand_service;
pub mod category_service;
pub mod customer_service;
pub mod frame_material_service;
pub mod menu_service;
pub mod permission_service;
pub mod product_service;
pub mod role_service;
pub mod series_service;
pub mod storefront_service;
pub mod sys_role_service;
pub mod sys_user_service;

pub use auth_service::{AuthService, CustomerProfile, LoginResult, PrincipalInfo};
pub use brand_service::BrandService;
pub use category_service::CategoryService;
pub use customer_service::CustomerService;
pub use frame_material_service::FrameMaterialService;
pub use menu_service::MenuService;
pub use permission_service::PermissionService;
pub use product_service::ProductService;
pub use role_service::RoleService;
pub use series_service::SeriesService;
pub use storefront_service::{CatalogOverview, StorefrontService};
pub use sys_role_service::SysRoleService;
pub use sys_user_service::SysUserService;
