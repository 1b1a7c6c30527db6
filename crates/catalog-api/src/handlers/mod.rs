//! HTTP handlers

pub mod auth;
pub mod brands;
pub mod categories;
pub mod customers;
pub mod frame_materials;
pub mod health;
pub mod menus;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod series;
pub mod storefront;
pub mod sys_roles;
pub mod sys_users;

use serde::{Deserialize, Serialize};

/// `?query=&currentPage=&pageSize=` as sent by the admin tables.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub query: String,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

/// `?query=` for the unpaginated trees.
#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    #[serde(default)]
    pub query: String,
}

/// `{"ids": [...]}` body for batch deletes and grant replacement.
#[derive(Debug, Deserialize)]
pub struct IdList {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct BatchDeleteResponse {
    pub deleted: u64,
}
