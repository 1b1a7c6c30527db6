//! Storefront customer role (e.g. `vip`)

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

static ROLE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid role code pattern"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub code: String,
    /// 1 enabled, 0 disabled.
    pub status: i16,
    pub sort: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn is_enabled(&self) -> bool {
        self.status == 1
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewRole {
    #[validate(length(min = 1, max = 50, message = "Role name must be between 1 and 50 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 50, message = "Role code must be between 1 and 50 characters"),
        regex(path = *ROLE_CODE, message = "Role code must be alphanumeric")
    )]
    pub code: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: i16,

    #[serde(default)]
    #[validate(range(min = 0, message = "Sort must not be negative"))]
    pub sort: i32,

    #[serde(default)]
    #[validate(length(max = 255, message = "Description too long"))]
    pub description: String,
}

impl NewRole {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoleUpdate {
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 1, max = 50, message = "Role name must be between 1 and 50 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 50, message = "Role code must be between 1 and 50 characters"),
        regex(path = *ROLE_CODE, message = "Role code must be alphanumeric")
    )]
    pub code: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: i16,

    #[serde(default)]
    #[validate(range(min = 0, message = "Sort must not be negative"))]
    pub sort: i32,

    #[serde(default)]
    #[validate(length(max = 255, message = "Description too long"))]
    pub description: String,
}

impl RoleUpdate {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(code: &str, status: i16) -> NewRole {
        NewRole { name: "VIP".into(), code: code.into(), status, sort: 0, description: String::new() }
    }

    #[test]
    fn test_code_must_be_alphanumeric() {
        assert!(role("vip", 1).validate().is_ok());
        assert!(role("vip-gold", 1).validate().is_err());
        assert!(role("", 1).validate().is_err());
    }

    #[test]
    fn test_status_is_zero_or_one() {
        assert!(role("vip", 2).validate().is_err());
    }
}
