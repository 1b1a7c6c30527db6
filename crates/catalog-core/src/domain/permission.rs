// ============================================================================
// Catalog Core - Permission Entity
// File: crates/catalog-core/src/domain/permission.rs
// Description: Admin permission (route + method), nested by parent
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;
use crate::tree::TreeRecord;

const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Permission entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    /// `0` for top-level permission groups.
    pub parent_id: i64,
    pub name: String,
    pub description: String,
    pub route: String,
    pub method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TreeRecord for Permission {
    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        Some(self.parent_id)
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Upper-cases `method` and checks it is a known HTTP verb.
pub fn normalize_method(method: &str) -> Result<String, DomainError> {
    let upper = method.trim().to_uppercase();
    if HTTP_METHODS.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(DomainError::ValidationError(format!("method: unsupported HTTP method '{}'", method)))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPermission {
    #[validate(length(min = 1, max = 100, message = "Permission name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description too long"))]
    pub description: String,

    #[validate(length(min = 1, max = 255, message = "Route must be between 1 and 255 characters"))]
    pub route: String,

    pub method: String,

    #[serde(default)]
    pub parent_id: i64,
}

impl NewPermission {
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.name = self.name.trim().to_string();
        self.route = self.route.trim().to_string();
        self.method = normalize_method(&self.method)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PermissionUpdate {
    /// Taken from the request path when absent from the body.
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Permission name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description too long"))]
    pub description: String,

    #[validate(length(min = 1, max = 255, message = "Route must be between 1 and 255 characters"))]
    pub route: String,

    pub method: String,

    #[serde(default)]
    pub parent_id: i64,
}

impl PermissionUpdate {
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.name = self.name.trim().to_string();
        self.route = self.route.trim().to_string();
        self.method = normalize_method(&self.method)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method(" post ").unwrap(), "POST");
        assert!(matches!(normalize_method("FETCH"), Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_new_permission_validation() {
        let p = NewPermission {
            name: "Manage brands".into(),
            description: String::new(),
            route: "/api/v1/admin/brands".into(),
            method: "get".into(),
            parent_id: 0,
        }
        .normalized()
        .unwrap();
        assert_eq!(p.method, "GET");
        assert!(p.validate().is_ok());
    }
}
