// ============================================================================
// Catalog Core - Back-office Role Entity
// File: crates/catalog-core/src/domain/sys_role.rs
// Description: Admin role with permission and menu grants
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysRole {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A role together with everything it grants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SysRoleDetail {
    #[serde(flatten)]
    pub role: SysRole,
    pub permission_ids: Vec<i64>,
    pub menu_ids: Vec<i64>,
}

/// Role name as shown next to an admin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysRoleRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSysRole {
    #[validate(length(min = 1, max = 100, message = "Role name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Description too long"))]
    pub description: String,
}

impl NewSysRole {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SysRoleUpdate {
    /// Taken from the request path when absent from the body.
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Role name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Description too long"))]
    pub description: String,
}

impl SysRoleUpdate {
    pub fn normalized(self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}
