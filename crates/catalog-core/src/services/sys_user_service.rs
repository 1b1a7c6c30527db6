// ============================================================================
// Catalog Core - Back-office User Service
// File: crates/catalog-core/src/services/sys_user_service.rs
// ============================================================================
//! Admin account management from the console.

use std::sync::Arc;

use catalog_security::PasswordService;
use catalog_shared::utils::mask_email;
use catalog_shared::{Page, Pagination};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewSysUser, SysUserChanges, SysUserDraft, SysUserSummary, SysUserUpdate};
use crate::error::DomainError;
use crate::repositories::{SysRoleRepository, SysUserRepository};
use crate::services::sys_role_service::{dedup, ensure_all_found};

pub struct SysUserService<U, R>
where
    U: SysUserRepository + ?Sized,
    R: SysRoleRepository + ?Sized,
{
    users: Arc<U>,
    roles: Arc<R>,
}

impl<U, R> SysUserService<U, R>
where
    U: SysUserRepository + ?Sized,
    R: SysRoleRepository + ?Sized,
{
    pub fn new(users: Arc<U>, roles: Arc<R>) -> Self {
        Self { users, roles }
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<SysUserSummary>, DomainError> {
        let (items, total) = self.users.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<SysUserSummary, DomainError> {
        self.users.find_summary(id).await?.ok_or(DomainError::UserNotFound)
    }

    pub async fn create(&self, input: NewSysUser) -> Result<SysUserSummary, DomainError> {
        let input = NewSysUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            role_ids: dedup(&input.role_ids),
            ..input
        };
        input.validate()?;
        info!("Creating admin account for: {}", mask_email(&input.email));

        self.ensure_unique(&input.username, &input.email, None).await?;
        self.ensure_roles(&input.role_ids).await?;

        let password_hash = hash_password(&input.password)?;
        let draft = SysUserDraft {
            username: input.username,
            email: input.email,
            password_hash,
            is_active: input.is_active,
            role_ids: input.role_ids,
        };
        let created = self.users.create(&draft).await?;

        info!(id = created.id, roles = draft.role_ids.len(), "admin account created");
        self.get(created.id).await
    }

    /// Replaces the account's fields and roles; the password changes only
    /// when one is given.
    pub async fn update(&self, input: SysUserUpdate) -> Result<SysUserSummary, DomainError> {
        let input = SysUserUpdate {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password: input.password.filter(|p| !p.is_empty()),
            role_ids: dedup(&input.role_ids),
            ..input
        };
        input.validate()?;

        self.ensure_unique(&input.username, &input.email, Some(input.id)).await?;
        self.ensure_roles(&input.role_ids).await?;

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        let changes = SysUserChanges {
            id: input.id,
            username: input.username,
            email: input.email,
            password_hash,
            is_active: input.is_active,
            role_ids: input.role_ids,
        };
        let updated = self.users.update(&changes).await?.ok_or(DomainError::UserNotFound)?;

        info!(
            id = updated.id,
            password_changed = changes.password_hash.is_some(),
            "admin account updated"
        );
        self.get(updated.id).await
    }

    /// Deletes account `id` on behalf of `actor_id`, who cannot remove
    /// themselves.
    pub async fn delete(&self, actor_id: i64, id: i64) -> Result<(), DomainError> {
        if actor_id == id {
            warn!(id, "admin tried to delete their own account");
            return Err(DomainError::CannotDeleteSelf);
        }
        if !self.users.delete(id).await? {
            return Err(DomainError::UserNotFound);
        }
        info!(id, actor_id, "admin account deleted");
        Ok(())
    }

    async fn ensure_unique(&self, username: &str, email: &str, exclude_id: Option<i64>) -> Result<(), DomainError> {
        if let Some(existing) = self.users.find_conflict(username, email, exclude_id).await? {
            warn!(existing = existing.id, "admin account conflict");
            if existing.email.eq_ignore_ascii_case(email) {
                return Err(DomainError::EmailAlreadyExists(email.to_string()));
            }
            return Err(DomainError::UsernameAlreadyExists(username.to_string()));
        }
        Ok(())
    }

    async fn ensure_roles(&self, role_ids: &[i64]) -> Result<(), DomainError> {
        if role_ids.is_empty() {
            return Ok(());
        }
        let found = self.roles.existing_ids(role_ids).await?;
        ensure_all_found("admin role", role_ids, &found)
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    PasswordService::hash(password).map_err(|e| DomainError::PasswordHashError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SysRoleRef, SysUser};
    use crate::repositories::{MockSysRoleRepository, MockSysUserRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn account(id: i64, username: &str, email: &str) -> SysUser {
        SysUser {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn summary(id: i64, roles: &[(i64, &str)]) -> SysUserSummary {
        SysUserSummary {
            id,
            username: "editor".into(),
            email: "editor@example.com".into(),
            is_active: true,
            roles: roles.iter().map(|(id, name)| SysRoleRef { id: *id, name: name.to_string() }).collect(),
            created_at: Utc::now(),
        }
    }

    fn service(users: MockSysUserRepository, roles: MockSysRoleRepository) -> SysUserService<MockSysUserRepository, MockSysRoleRepository> {
        SysUserService::new(Arc::new(users), Arc::new(roles))
    }

    fn new_user(role_ids: Vec<i64>) -> NewSysUser {
        NewSysUser {
            username: " editor ".into(),
            email: "Editor@Example.com".into(),
            password: "s3cret!".into(),
            is_active: true,
            role_ids,
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password_and_assigns_roles() {
        let mut users = MockSysUserRepository::new();
        users.expect_find_conflict()
            .with(eq("editor"), eq("editor@example.com"), eq(None::<i64>))
            .returning(|_, _, _| Ok(None));
        users.expect_create()
            .withf(|d| {
                d.role_ids == [2, 5]
                    && d.password_hash != "s3cret!"
                    && PasswordService::verify("s3cret!", &d.password_hash).unwrap_or(false)
            })
            .returning(|d| Ok(account(11, &d.username, &d.email)));
        users.expect_find_summary()
            .with(eq(11))
            .returning(|id| Ok(Some(summary(id, &[(2, "Editor"), (5, "Viewer")]))));
        let mut roles = MockSysRoleRepository::new();
        roles.expect_existing_ids().returning(|ids| Ok(ids.to_vec()));

        let created = service(users, roles).create(new_user(vec![5, 2, 5])).await.unwrap();
        assert_eq!(created.id, 11);
        assert_eq!(created.roles.len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let mut users = MockSysUserRepository::new();
        users.expect_find_conflict()
            .returning(|_, _, _| Ok(Some(account(3, "someone", "editor@example.com"))));
        users.expect_create().never();

        let err = service(users, MockSysRoleRepository::new())
            .create(new_user(Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_role() {
        let mut users = MockSysUserRepository::new();
        users.expect_find_conflict().returning(|_, _, _| Ok(None));
        users.expect_create().never();
        let mut roles = MockSysRoleRepository::new();
        roles.expect_existing_ids().returning(|_| Ok(vec![2]));

        let err = service(users, roles).create(new_user(vec![2, 9])).await.unwrap_err();
        assert!(matches!(err, DomainError::ReferenceNotFound(ref d) if d == "admin role 9"));
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_hash() {
        let mut users = MockSysUserRepository::new();
        users.expect_find_conflict()
            .with(eq("editor"), eq("editor@example.com"), eq(Some(11)))
            .returning(|_, _, _| Ok(None));
        users.expect_update()
            .withf(|c| c.password_hash.is_none() && c.role_ids.is_empty() && !c.is_active)
            .returning(|c| Ok(Some(account(c.id, &c.username, &c.email))));
        users.expect_find_summary().returning(|id| Ok(Some(summary(id, &[]))));

        let updated = service(users, MockSysRoleRepository::new())
            .update(SysUserUpdate {
                id: 11,
                username: "editor".into(),
                email: "editor@example.com".into(),
                password: Some(String::new()),
                is_active: false,
                role_ids: Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(updated.id, 11);
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let mut users = MockSysUserRepository::new();
        users.expect_find_conflict().returning(|_, _, _| Ok(None));
        users.expect_update().returning(|_| Ok(None));

        let err = service(users, MockSysRoleRepository::new())
            .update(SysUserUpdate {
                id: 40,
                username: "ghost".into(),
                email: "ghost@example.com".into(),
                password: None,
                is_active: true,
                role_ids: Vec::new(),
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let mut users = MockSysUserRepository::new();
        users.expect_delete().never();
        let err = service(users, MockSysRoleRepository::new()).delete(7, 7).await.unwrap_err();
        assert!(matches!(err, DomainError::CannotDeleteSelf));
    }

    #[tokio::test]
    async fn test_delete_other_account() {
        let mut users = MockSysUserRepository::new();
        users.expect_delete().with(eq(8)).returning(|_| Ok(true));
        assert!(service(users, MockSysRoleRepository::new()).delete(7, 8).await.is_ok());
    }
}
