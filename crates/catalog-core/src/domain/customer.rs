// ============================================================================
// Catalog Core - Customer Entity
// File: crates/catalog-core/src/domain/customer.rs
// Description: Storefront account, separate from back-office users
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account status, stored as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Inactive,
    Active,
}

impl CustomerStatus {
    pub fn as_i16(&self) -> i16 {
        match self {
            CustomerStatus::Inactive => 0,
            CustomerStatus::Active => 1,
        }
    }

    pub fn from_i16(value: i16) -> Self {
        match value {
            1 => CustomerStatus::Active,
            _ => CustomerStatus::Inactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Inactive => "inactive",
            CustomerStatus::Active => "active",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: Option<String>,
    pub status: CustomerStatus,
    /// Storefront role; decides VIP visibility.
    pub role_id: Option<i64>,
    #[serde(skip_serializing)]
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn can_login(&self) -> bool {
        self.status == CustomerStatus::Active
    }
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCustomer {
    #[validate(length(min = 2, max = 50, message = "Username must be between 2 and 50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,
}

/// Account created from the admin console.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCustomerAccount {
    #[validate(length(min = 2, max = 50, message = "Username must be between 2 and 50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,

    #[serde(default)]
    pub status: CustomerStatus,

    #[serde(default)]
    pub role_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerAccountUpdate {
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

    #[serde(default)]
    pub status: CustomerStatus,

    #[serde(default)]
    pub role_id: Option<i64>,
}

/// Row to insert once the password has been hashed.
#[derive(Debug, Clone)]
pub struct CustomerDraft {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub status: CustomerStatus,
    pub role_id: Option<i64>,
    pub ip_address: Option<String>,
}

/// Replacement values for an account.
#[derive(Debug, Clone)]
pub struct CustomerChanges {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub status: CustomerStatus,
    pub role_id: Option<i64>,
}
