//! Application-wide constants

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";
pub const REALM_ADMIN: &str = "admin";
pub const REALM_STOREFRONT: &str = "storefront";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 259_200;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604_800;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;
/// `parent_id` value that marks a top-level row.
pub const ROOT_PARENT_ID: i64 = 0;
/// Deepest level a category or permission may be stored at.
pub const MAX_TREE_DEPTH: usize = 16;
