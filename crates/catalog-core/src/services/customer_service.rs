// ============================================================================
// Catalog Core - Customer Admin Service
// File: crates/catalog-core/src/services/customer_service.rs
// ============================================================================
//! Storefront accounts as managed from the admin console.

use std::sync::Arc;

use catalog_security::PasswordService;
use catalog_shared::utils::mask_email;
use catalog_shared::{Page, Pagination};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{Customer, CustomerAccountUpdate, CustomerChanges, CustomerDraft, NewCustomerAccount};
use crate::error::DomainError;
use crate::repositories::{CustomerRepository, RoleRepository};

pub struct CustomerService<C, R>
where
    C: CustomerRepository + ?Sized,
    R: RoleRepository + ?Sized,
{
    customers: Arc<C>,
    roles: Arc<R>,
}

impl<C, R> CustomerService<C, R>
where
    C: CustomerRepository + ?Sized,
    R: RoleRepository + ?Sized,
{
    pub fn new(customers: Arc<C>, roles: Arc<R>) -> Self {
        Self { customers, roles }
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<Customer>, DomainError> {
        let (items, total) = self.customers.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<Customer, DomainError> {
        self.customers.find_by_id(id).await?.ok_or(DomainError::UserNotFound)
    }

    pub async fn create(&self, input: NewCustomerAccount) -> Result<Customer, DomainError> {
        let input = NewCustomerAccount {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            ..input
        };
        input.validate()?;
        info!("Creating storefront account for: {}", mask_email(&input.email));

        self.ensure_unique(&input.username, &input.email, None).await?;
        self.ensure_role(input.role_id).await?;

        let draft = CustomerDraft {
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            status: input.status,
            role_id: input.role_id,
            ip_address: None,
        };
        let created = self.customers.create(&draft).await?;
        info!(id = created.id, status = created.status.as_str(), "storefront account created");
        Ok(created)
    }

    pub async fn update(&self, input: CustomerAccountUpdate) -> Result<Customer, DomainError> {
        let input = CustomerAccountUpdate {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password: input.password.filter(|p| !p.is_empty()),
            ..input
        };
        input.validate()?;

        self.ensure_unique(&input.username, &input.email, Some(input.id)).await?;
        self.ensure_role(input.role_id).await?;

        let changes = CustomerChanges {
            id: input.id,
            username: input.username,
            email: input.email,
            password_hash: input.password.as_deref().map(hash_password).transpose()?,
            status: input.status,
            role_id: input.role_id,
        };
        let updated = self.customers.update(&changes).await?.ok_or(DomainError::UserNotFound)?;
        info!(id = updated.id, role_id = ?updated.role_id, "storefront account updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.customers.delete(id).await? {
            return Err(DomainError::UserNotFound);
        }
        info!(id, "storefront account deleted");
        Ok(())
    }

    async fn ensure_unique(&self, username: &str, email: &str, exclude_id: Option<i64>) -> Result<(), DomainError> {
        let other = |c: &Customer| Some(c.id) != exclude_id;
        if self.customers.find_by_email(email).await?.filter(other).is_some() {
            warn!("Storefront email already taken: {}", mask_email(email));
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }
        if self.customers.find_by_username(username).await?.filter(other).is_some() {
            return Err(DomainError::UsernameAlreadyExists(username.to_string()));
        }
        Ok(())
    }

    async fn ensure_role(&self, role_id: Option<i64>) -> Result<(), DomainError> {
        let Some(id) = role_id else {
            return Ok(());
        };
        match self.roles.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::ReferenceNotFound(format!("role {}", id))),
        }
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    PasswordService::hash(password).map_err(|e| DomainError::PasswordHashError(e.to_string()))
}
