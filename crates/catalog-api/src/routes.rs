//! Router assembly

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::handlers::{
    auth, brands, categories, customers, frame_materials, health, menus, permissions, products, roles, series,
    storefront, sys_roles, sys_users,
};
use crate::middleware::{limit_login, optional_customer, require_admin, require_customer};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/menus", get(menus::my_menus))
        .route("/menus/tree", get(menus::tree))
        .route("/categories", get(categories::list).post(categories::create))
        .route("/categories/tree", get(categories::tree))
        .route("/categories/cascader", get(categories::cascader))
        .route("/categories/resolve-path", post(categories::resolve_path))
        .route(
            "/categories/{id}",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        .route("/permissions", get(permissions::list).post(permissions::create))
        .route("/permissions/tree", get(permissions::tree))
        .route("/permissions/page", get(permissions::page))
        .route(
            "/permissions/{id}",
            get(permissions::get).put(permissions::update).delete(permissions::delete),
        )
        .route("/brands", get(brands::list).post(brands::create))
        .route("/brands/page", get(brands::page))
        .route("/brands/batch-delete", post(brands::delete_batch))
        .route("/brands/{id}", get(brands::get).put(brands::update).delete(brands::delete))
        .route("/frame-materials", get(frame_materials::list).post(frame_materials::create))
        .route("/frame-materials/page", get(frame_materials::page))
        .route("/frame-materials/batch-delete", post(frame_materials::delete_batch))
        .route(
            "/frame-materials/{id}",
            get(frame_materials::get).put(frame_materials::update).delete(frame_materials::delete),
        )
        .route("/series", get(series::list).post(series::create))
        .route("/series/page", get(series::page))
        .route("/series/batch-delete", post(series::delete_batch))
        .route("/series/{id}", get(series::get).put(series::update).delete(series::delete))
        .route("/products", post(products::create))
        .route("/products/page", get(products::page))
        .route("/products/batch-delete", post(products::delete_batch))
        .route("/products/{id}", get(products::get).put(products::update).delete(products::delete))
        .route("/roles", get(roles::list).post(roles::create))
        .route("/roles/page", get(roles::page))
        .route("/roles/{id}", get(roles::get).put(roles::update).delete(roles::delete))
        .route("/users", post(customers::create))
        .route("/users/page", get(customers::page))
        .route("/users/{id}", get(customers::get).put(customers::update).delete(customers::delete))
        .route("/sys-roles", get(sys_roles::list).post(sys_roles::create))
        .route("/sys-roles/page", get(sys_roles::page))
        .route(
            "/sys-roles/{id}",
            get(sys_roles::get).put(sys_roles::update).delete(sys_roles::delete),
        )
        .route("/sys-roles/{id}/permissions", put(sys_roles::set_permissions))
        .route("/sys-roles/{id}/menus", put(sys_roles::set_menus))
        .route("/sys-users", post(sys_users::create))
        .route("/sys-users/page", get(sys_users::page))
        .route(
            "/sys-users/{id}",
            get(sys_users::get).put(sys_users::update).delete(sys_users::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    let logins = Router::new()
        .route("/admin/login", post(auth::admin_login))
        .route("/login", post(auth::customer_login))
        .route_layer(from_fn_with_state(state.clone(), limit_login));

    let customer = Router::new()
        .route("/user/profile", get(storefront::profile))
        .route_layer(from_fn_with_state(state.clone(), require_customer));

    let public = Router::new()
        .route("/register", post(auth::register))
        .route("/auth/refresh", post(auth::refresh))
        .route("/categories/tree", get(storefront::category_tree))
        .merge(
            Router::new()
                .route("/home", get(storefront::home))
                .route("/catalog", get(storefront::catalog))
                .route("/series/{id}", get(storefront::series))
                .route_layer(from_fn_with_state(state.clone(), optional_customer)),
        );

    let api = Router::new()
        .nest("/admin", admin)
        .merge(logins)
        .merge(customer)
        .merge(public);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use mockall::predicate::eq;
    use serde_json::{json, Value};

    use catalog_core::domain::{Category, Customer, CustomerStatus, Menu, Permission, Series, SysRole};
    use catalog_core::repositories::{
        MockCategoryRepository, MockCustomerRepository, MockMenuRepository, MockPermissionRepository,
        MockSeriesRepository, MockSysRoleRepository, MockSysUserRepository,
    };
    use catalog_security::{PasswordService, Realm};

    use crate::test_support::{call, call_with_headers, test_config, TestRepos};

    fn category(id: i64, parent_id: i64, name: &str) -> Category {
        let now = chrono::Utc::now();
        Category {
            id,
            parent_id,
            name: name.into(),
            slug: name.to_lowercase(),
            description: String::new(),
            display_order: id,
            created_at: now,
            updated_at: now,
        }
    }

    fn catalog_rows() -> Vec<Category> {
        vec![
            category(1, 0, "Eyewear"),
            category(2, 1, "Sunglasses"),
            category(3, 1, "Reading"),
            category(4, 2, "Polarized"),
            category(5, 0, "Accessories"),
            category(6, 5, "Cases"),
        ]
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestRepos::default().app();
        let (status, body) = call(app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin_token() {
        let repos = TestRepos::default();
        let customer_token = repos.token(9, Realm::Storefront);
        let app = repos.app();

        let (status, body) = call(app.clone(), Method::GET, "/api/v1/admin/categories/tree", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, _) = call(app, Method::GET, "/api/v1/admin/categories/tree", Some(&customer_token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_category_tree_is_filtered_then_paginated() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_list_ordered().returning(|| Ok(catalog_rows()));
        let repos = TestRepos { categories, ..Default::default() };
        let token = repos.token(1, Realm::Admin);

        let (status, body) = call(
            repos.app(),
            Method::GET,
            "/api/v1/admin/categories/tree?query=POLAR&currentPage=1&pageSize=10",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["total"], 1);
        assert_eq!(data["totalPages"], 1);
        let root = &data["items"][0];
        assert_eq!(root["name"], "Eyewear");
        assert_eq!(root["parent_id"], 0);
        assert_eq!(root["children"].as_array().unwrap().len(), 1);
        assert_eq!(root["children"][0]["name"], "Sunglasses");
        assert_eq!(root["children"][0]["children"][0]["name"], "Polarized");
        assert_eq!(root["children"][0]["children"][0]["children"], json!([]));
    }

    #[tokio::test]
    async fn test_category_tree_page_past_end() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_list_ordered().returning(|| Ok(catalog_rows()));
        let repos = TestRepos { categories, ..Default::default() };
        let token = repos.token(1, Realm::Admin);

        let (status, body) = call(
            repos.app(),
            Method::GET,
            "/api/v1/admin/categories/tree?currentPage=3&pageSize=1",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"], json!([]));
        assert_eq!(body["data"]["total"], 2);
    }

    #[tokio::test]
    async fn test_create_category_with_unknown_parent() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().with(eq(77)).returning(|_| Ok(None));
        let repos = TestRepos { categories, ..Default::default() };
        let token = repos.token(1, Realm::Admin);

        let (status, body) = call(
            repos.app(),
            Method::POST,
            "/api/v1/admin/categories",
            Some(&token),
            Some(json!({ "name": "Kids", "slug": "kids", "pid": 77 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_gets_envelope() {
        let repos = TestRepos::default();
        let token = repos.token(1, Realm::Admin);
        let (status, body) = call(
            repos.app(),
            Method::POST,
            "/api/v1/admin/brands",
            Some(&token),
            Some(json!({ "description": "missing name" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_permission_tree_shape() {
        let mut permissions = MockPermissionRepository::new();
        permissions.expect_list_all().returning(|| {
            let now = chrono::Utc::now();
            let p = |id, parent_id, name: &str| Permission {
                id,
                parent_id,
                name: name.into(),
                description: String::new(),
                route: format!("/api/v1/admin/{}", id),
                method: "GET".into(),
                created_at: now,
                updated_at: now,
            };
            Ok(vec![p(1, 0, "Catalog"), p(2, 1, "Brands"), p(3, 99, "Orphan")])
        });
        let repos = TestRepos { permissions, ..Default::default() };
        let token = repos.token(1, Realm::Admin);

        let (status, body) = call(repos.app(), Method::GET, "/api/v1/admin/permissions/tree", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let forest = body["data"]["sys_permissions"].as_array().unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0]["children"][0]["name"], "Brands");
        assert_eq!(forest[0]["children"][0]["method"], "GET");
    }

    #[tokio::test]
    async fn test_menus_for_token_subject() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_for_sys_user().with(eq(42)).returning(|_| {
            Ok(vec![
                Menu { id: 1, parent_id: None, label: "Catalog".into(), link_to: "/catalog".into(), icon: "box".into(), order: 2 },
                Menu { id: 2, parent_id: Some(1), label: "Brands".into(), link_to: "/brands".into(), icon: String::new(), order: 1 },
            ])
        });
        let repos = TestRepos { menus, ..Default::default() };
        let token = repos.token(42, Realm::Admin);

        let (status, body) = call(repos.app(), Method::GET, "/api/v1/admin/menus", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["label"], "Catalog");
        assert_eq!(body["data"][0]["children"][0]["link_to"], "/brands");
    }

    #[tokio::test]
    async fn test_storefront_category_tree_is_public() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_list_ordered().returning(|| Ok(catalog_rows()));
        let repos = TestRepos { categories, ..Default::default() };

        let (status, body) = call(repos.app(), Method::GET, "/api/v1/categories/tree?query=case", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["children"][0]["name"], "Cases");
    }

    #[tokio::test]
    async fn test_customer_login_inactive_account_is_forbidden() {
        let hash = PasswordService::hash("secret1").unwrap();
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().returning(move |_| {
            Ok(Some(Customer {
                id: 5,
                username: "jane".into(),
                email: "jane@example.com".into(),
                password_hash: hash.clone(),
                avatar: None,
                status: CustomerStatus::Inactive,
                role_id: None,
                ip_address: None,
                created_at: chrono::Utc::now(),
            }))
        });
        let repos = TestRepos { customers, ..Default::default() };

        let (status, body) = call(
            repos.app(),
            Method::POST,
            "/api/v1/login",
            None,
            Some(json!({ "email": "jane@example.com", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_login_is_rate_limited() {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().returning(|_| Ok(None));
        let repos = TestRepos { customers, ..Default::default() };
        let app = repos.app();

        let mut statuses = Vec::new();
        for _ in 0..3 {
            let (status, _): (StatusCode, Value) = call(
                app.clone(),
                Method::POST,
                "/api/v1/login",
                None,
                Some(json!({ "email": "nobody@example.com", "password": "whatever" })),
            )
            .await;
            statuses.push(status);
        }
        assert_eq!(statuses, [StatusCode::UNAUTHORIZED, StatusCode::UNAUTHORIZED, StatusCode::TOO_MANY_REQUESTS]);
    }

    #[tokio::test]
    async fn test_profile_requires_customer_token() {
        let repos = TestRepos::default();
        let admin_token = repos.token(1, Realm::Admin);
        let (status, _) = call(repos.app(), Method::GET, "/api/v1/user/profile", Some(&admin_token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    async fn failed_logins(app: axum::Router, forwarded: &[String]) -> Vec<StatusCode> {
        let mut statuses = Vec::new();
        for address in forwarded {
            let (status, _) = call_with_headers(
                app.clone(),
                Method::POST,
                "/api/v1/login",
                None,
                &[("x-forwarded-for", address.as_str())],
                Some(json!({ "email": "nobody@example.com", "password": "whatever" })),
            )
            .await;
            statuses.push(status);
        }
        statuses
    }

    #[tokio::test]
    async fn test_rotating_forwarded_header_does_not_reset_limit() {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().returning(|_| Ok(None));
        let app = TestRepos { customers, ..Default::default() }.app();

        let forwarded: Vec<String> = (1..=4).map(|i| format!("198.51.100.{}", i)).collect();
        let statuses = failed_logins(app, &forwarded).await;
        assert_eq!(
            statuses,
            [
                StatusCode::UNAUTHORIZED,
                StatusCode::UNAUTHORIZED,
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::TOO_MANY_REQUESTS
            ]
        );
    }

    #[tokio::test]
    async fn test_trusted_forwarded_header_keys_the_limit() {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().returning(|_| Ok(None));
        let mut config = test_config();
        config.rate_limit.trust_forwarded = true;
        let app = TestRepos { customers, ..Default::default() }.app_with_config(config);

        let forwarded: Vec<String> = (1..=4).map(|i| format!("198.51.100.{}", i)).collect();
        let statuses = failed_logins(app.clone(), &forwarded).await;
        assert!(statuses.iter().all(|s| *s == StatusCode::UNAUTHORIZED));

        let same = vec!["203.0.113.9".to_string(); 3];
        let statuses = failed_logins(app, &same).await;
        assert_eq!(statuses[2], StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_sys_role_permission_grant() {
        let mut sys_roles = MockSysRoleRepository::new();
        sys_roles.expect_find_by_id().with(eq(2)).returning(|id| {
            let now = chrono::Utc::now();
            Ok(Some(SysRole { id, name: "Editor".into(), description: String::new(), created_at: now, updated_at: now }))
        });
        sys_roles.expect_replace_permissions()
            .withf(|id, ids| *id == 2 && ids == [1, 2])
            .times(1)
            .returning(|_, _| Ok(()));
        let mut permissions = MockPermissionRepository::new();
        permissions.expect_existing_ids().returning(|ids| Ok(ids.to_vec()));
        let repos = TestRepos { sys_roles, permissions, ..Default::default() };
        let token = repos.token(1, Realm::Admin);

        let (status, body) = call(
            repos.app(),
            Method::PUT,
            "/api/v1/admin/sys-roles/2/permissions",
            Some(&token),
            Some(json!({ "ids": [2, 1, 2] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["role_id"], 2);
        assert_eq!(body["data"]["ids"], json!([1, 2]));
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_own_account() {
        let mut sys_users = MockSysUserRepository::new();
        sys_users.expect_delete().never();
        let repos = TestRepos { sys_users, ..Default::default() };
        let token = repos.token(42, Realm::Admin);

        let (status, body) = call(repos.app(), Method::DELETE, "/api/v1/admin/sys-users/42", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_new_design_series_hidden_from_guests() {
        let mut series = MockSeriesRepository::new();
        series.expect_find_by_id().with(eq(12)).returning(|id| {
            let now = chrono::Utc::now();
            Ok(Some(Series {
                id,
                name: "Aurora".into(),
                description: String::new(),
                pdf_url: "aurora.pdf".into(),
                frame_material_id: 1,
                frame_material_name: "Titanium".into(),
                is_new_design: true,
                created_at: now,
                updated_at: now,
            }))
        });
        let repos = TestRepos { series, ..Default::default() };

        let (status, body) = call(repos.app(), Method::GET, "/api/v1/series/12", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }
}
