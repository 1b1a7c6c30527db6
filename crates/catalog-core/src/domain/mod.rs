//! # Catalog Core - Domain Module
//! 
//! Domain entities for the catalog backend.

pub mod brand;
pub mod category;
pub mod customer;
pub mod frame_material;
pub mod menu;
pub mod permission;
pub mod product;
pub mod role;
pub mod series;
pub mod storefront;
pub mod sys_role;
pub mod sys_user;

// Re-export all entities and inputs
pub use brand::{Brand, BrandUpdate, NewBrand};
pub use category::{CascaderOption, Category, CategoryUpdate, NewCategory};
pub use customer::{
    Customer, CustomerAccountUpdate, CustomerChanges, CustomerDraft, CustomerStatus, NewCustomer,
    NewCustomerAccount,
};
pub use frame_material::{FrameMaterial, FrameMaterialUpdate, NewFrameMaterial};
pub use menu::Menu;
pub use permission::{NewPermission, Permission, PermissionUpdate};
pub use product::{image_file_name, image_url, NewProduct, Product, ProductDetail, ProductUpdate};
pub use role::{NewRole, Role, RoleUpdate};
pub use series::{NewSeries, Series, SeriesUpdate};
pub use storefront::{CatalogFilter, Facet, ProductCard, SeriesCard, SeriesShowcase};
pub use sys_role::{NewSysRole, SysRole, SysRoleDetail, SysRoleRef, SysRoleUpdate};
pub use sys_user::{NewSysUser, SysUser, SysUserChanges, SysUserDraft, SysUserSummary, SysUserUpdate};
