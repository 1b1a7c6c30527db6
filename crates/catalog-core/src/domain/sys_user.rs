//! Back-office administrator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::sys_role::SysRoleRef;

#[derive(Debug, Clone, Serialize)]
pub struct SysUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin account as listed in the console, with its roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SysUserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub roles: Vec<SysRoleRef>,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSysUser {
    #[validate(length(min = 2, max = 50, message = "Username must be between 2 and 50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default, alias = "sys_role_ids")]
    pub role_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SysUserUpdate {
    /// Taken from the request path when absent from the body.
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 2, max = 50, message = "Username must be between 2 and 50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Left unchanged when absent.
    #[serde(default)]
    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default, alias = "sys_role_ids")]
    pub role_ids: Vec<i64>,
}

/// Account row to insert once the password has been hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct SysUserDraft {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub role_ids: Vec<i64>,
}

/// Replacement values for an account; its roles are replaced as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct SysUserChanges {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub role_ids: Vec<i64>,
}
