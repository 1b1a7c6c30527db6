//! Router harness over mocked repositories.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use catalog_core::repositories::{
    MockBrandRepository, MockCatalogRepository, MockCategoryRepository, MockCustomerRepository,
    MockFrameMaterialRepository, MockMenuRepository, MockPermissionRepository, MockProductRepository,
    MockRoleRepository, MockSeriesRepository, MockSysRoleRepository, MockSysUserRepository,
};
use catalog_security::{JwtService, Realm};
use catalog_shared::config::{
    AppConfig, AppSettings, CatalogSettings, CorsSettings, DatabaseSettings, JwtSettings, LogSettings,
    RateLimitSettings,
};

use crate::routes::router;
use crate::state::{AppState, Repositories};

pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            env: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            name: "catalog-test".into(),
        },
        database: DatabaseSettings {
            url: "postgres://localhost/catalog_test".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_seconds: 1,
            run_migrations: false,
        },
        jwt: JwtSettings {
            secret: "router-test-secret-with-some-length".into(),
            issuer: "catalog-test".into(),
            access_token_expiry: 600,
            refresh_token_expiry: 3600,
        },
        log: LogSettings { level: "debug".into(), json: false, directory: None },
        cors: CorsSettings { allowed_origins: Vec::new() },
        rate_limit: RateLimitSettings {
            login_per_minute: 1,
            login_burst: 2,
            trust_forwarded: false,
            cleanup_interval_seconds: 60,
        },
        catalog: CatalogSettings {
            default_page_size: 10,
            max_page_size: 100,
            auto_activate_customers: false,
            image_base_url: "https://cdn.example.com".into(),
            vip_role_code: "vip".into(),
        },
    }
}

#[derive(Default)]
pub struct TestRepos {
    pub categories: MockCategoryRepository,
    pub permissions: MockPermissionRepository,
    pub menus: MockMenuRepository,
    pub brands: MockBrandRepository,
    pub sys_users: MockSysUserRepository,
    pub sys_roles: MockSysRoleRepository,
    pub customers: MockCustomerRepository,
    pub roles: MockRoleRepository,
    pub frame_materials: MockFrameMaterialRepository,
    pub series: MockSeriesRepository,
    pub products: MockProductRepository,
    pub catalog: MockCatalogRepository,
}

impl TestRepos {
    pub fn token(&self, user_id: i64, realm: Realm) -> String {
        let jwt = &test_config().jwt;
        JwtService::new(&jwt.secret, jwt.issuer.clone(), jwt.access_token_expiry, jwt.refresh_token_expiry)
            .generate_access_token(user_id, realm)
            .unwrap()
    }

    pub fn app(self) -> Router {
        self.app_with_config(test_config())
    }

    pub fn app_with_config(self, config: AppConfig) -> Router {
        let repos = Repositories {
            categories: Arc::new(self.categories),
            permissions: Arc::new(self.permissions),
            menus: Arc::new(self.menus),
            brands: Arc::new(self.brands),
            sys_users: Arc::new(self.sys_users),
            sys_roles: Arc::new(self.sys_roles),
            customers: Arc::new(self.customers),
            roles: Arc::new(self.roles),
            frame_materials: Arc::new(self.frame_materials),
            series: Arc::new(self.series),
            products: Arc::new(self.products),
            catalog: Arc::new(self.catalog),
        };
        router(AppState::new(config, repos))
    }
}

pub async fn call(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    call_with_headers(app, method, uri, token, &[], body).await
}

pub async fn call_with_headers(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
