//! Shared application state

use std::sync::Arc;

use catalog_core::repositories::{
    BrandRepository, CatalogRepository, CategoryRepository, CustomerRepository, FrameMaterialRepository,
    MenuRepository, PermissionRepository, ProductRepository, RoleRepository, SeriesRepository,
    SysRoleRepository, SysUserRepository,
};
use catalog_core::services::{
    AuthService, BrandService, CategoryService, CustomerService, FrameMaterialService, MenuService,
    PermissionService, ProductService, RoleService, SeriesService, StorefrontService, SysRoleService,
    SysUserService,
};
use catalog_security::JwtService;
use catalog_shared::config::AppConfig;
use catalog_shared::Pagination;

use crate::middleware::rate_limit::LoginRateLimiter;

/// Storage adapters the services are built on.
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub permissions: Arc<dyn PermissionRepository>,
    pub menus: Arc<dyn MenuRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub sys_users: Arc<dyn SysUserRepository>,
    pub sys_roles: Arc<dyn SysRoleRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub frame_materials: Arc<dyn FrameMaterialRepository>,
    pub series: Arc<dyn SeriesRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
}

pub type SysRoles = SysRoleService<dyn SysRoleRepository, dyn PermissionRepository, dyn MenuRepository>;
pub type Products = ProductService<dyn ProductRepository, dyn SeriesRepository, dyn CategoryRepository>;
pub type Storefront =
    StorefrontService<dyn CatalogRepository, dyn SeriesRepository, dyn CustomerRepository, dyn RoleRepository>;

#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<CategoryService<dyn CategoryRepository>>,
    pub permissions: Arc<PermissionService<dyn PermissionRepository>>,
    pub menus: Arc<MenuService<dyn MenuRepository>>,
    pub brands: Arc<BrandService<dyn BrandRepository>>,
    pub auth: Arc<AuthService<dyn SysUserRepository, dyn CustomerRepository>>,
    pub sys_users: Arc<SysUserService<dyn SysUserRepository, dyn SysRoleRepository>>,
    pub sys_roles: Arc<SysRoles>,
    pub customers: Arc<CustomerService<dyn CustomerRepository, dyn RoleRepository>>,
    pub roles: Arc<RoleService<dyn RoleRepository>>,
    pub frame_materials: Arc<FrameMaterialService<dyn FrameMaterialRepository>>,
    pub series: Arc<SeriesService<dyn SeriesRepository, dyn FrameMaterialRepository>>,
    pub products: Arc<Products>,
    pub storefront: Arc<Storefront>,
    pub jwt: Arc<JwtService>,
    pub login_limiter: Arc<LoginRateLimiter>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let jwt = Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.issuer.clone(),
            config.jwt.access_token_expiry,
            config.jwt.refresh_token_expiry,
        ));
        let catalog = &config.catalog;

        Self {
            categories: Arc::new(CategoryService::new(repos.categories.clone())),
            permissions: Arc::new(PermissionService::new(repos.permissions.clone())),
            menus: Arc::new(MenuService::new(repos.menus.clone())),
            brands: Arc::new(BrandService::new(repos.brands)),
            auth: Arc::new(AuthService::new(repos.sys_users.clone(), repos.customers.clone(), jwt.clone())),
            sys_users: Arc::new(SysUserService::new(repos.sys_users, repos.sys_roles.clone())),
            sys_roles: Arc::new(SysRoleService::new(repos.sys_roles, repos.permissions, repos.menus)),
            customers: Arc::new(CustomerService::new(repos.customers.clone(), repos.roles.clone())),
            roles: Arc::new(RoleService::new(repos.roles.clone())),
            frame_materials: Arc::new(FrameMaterialService::new(repos.frame_materials.clone())),
            series: Arc::new(SeriesService::new(repos.series.clone(), repos.frame_materials)),
            products: Arc::new(ProductService::new(
                repos.products,
                repos.series.clone(),
                repos.categories,
                catalog.image_base_url.clone(),
            )),
            storefront: Arc::new(StorefrontService::new(
                repos.catalog,
                repos.series,
                repos.customers,
                repos.roles,
                catalog.vip_role_code.clone(),
                catalog.image_base_url.clone(),
            )),
            jwt,
            login_limiter: Arc::new(LoginRateLimiter::new(&config.rate_limit)),
            config: Arc::new(config),
        }
    }

    /// Page request with the configured default and maximum sizes applied.
    pub fn pagination(&self, current_page: Option<u32>, page_size: Option<u32>) -> Pagination {
        let catalog = &self.config.catalog;
        Pagination {
            current_page: current_page.unwrap_or(1),
            page_size: page_size.unwrap_or(catalog.default_page_size),
        }
        .normalized(catalog.max_page_size)
    }
}
