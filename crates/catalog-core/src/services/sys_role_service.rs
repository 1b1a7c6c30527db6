// ============================================================================
// Catalog Core - Back-office Role Service
// File: crates/catalog-core/src/services/sys_role_service.rs
// ============================================================================
//! Admin roles and what they grant: permissions and sidebar menus.

use std::sync::Arc;

use catalog_shared::{Page, Pagination};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewSysRole, SysRole, SysRoleDetail, SysRoleUpdate};
use crate::error::DomainError;
use crate::repositories::{MenuRepository, PermissionRepository, SysRoleRepository};

pub struct SysRoleService<R, P, M>
where
    R: SysRoleRepository + ?Sized,
    P: PermissionRepository + ?Sized,
    M: MenuRepository + ?Sized,
{
    roles: Arc<R>,
    permissions: Arc<P>,
    menus: Arc<M>,
}

impl<R, P, M> SysRoleService<R, P, M>
where
    R: SysRoleRepository + ?Sized,
    P: PermissionRepository + ?Sized,
    M: MenuRepository + ?Sized,
{
    pub fn new(roles: Arc<R>, permissions: Arc<P>, menus: Arc<M>) -> Self {
        Self { roles, permissions, menus }
    }

    pub async fn list_all(&self) -> Result<Vec<SysRole>, DomainError> {
        self.roles.list_all().await
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<SysRole>, DomainError> {
        let (items, total) = self.roles.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    /// The role with its granted permission and menu ids.
    pub async fn get(&self, id: i64) -> Result<SysRoleDetail, DomainError> {
        let role = self.roles.find_by_id(id).await?.ok_or(DomainError::SysRoleNotFound(id))?;
        let permission_ids = self.roles.permission_ids(id).await?;
        let menu_ids = self.roles.menu_ids(id).await?;
        Ok(SysRoleDetail { role, permission_ids, menu_ids })
    }

    pub async fn create(&self, input: NewSysRole) -> Result<SysRole, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_unique(&input.name, None).await?;

        let created = self.roles.create(&input).await?;
        info!(id = created.id, name = %created.name, "admin role created");
        Ok(created)
    }

    pub async fn update(&self, input: SysRoleUpdate) -> Result<SysRole, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_unique(&input.name, Some(input.id)).await?;

        let updated = self
            .roles
            .update(&input)
            .await?
            .ok_or(DomainError::SysRoleNotFound(input.id))?;
        info!(id = updated.id, "admin role updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.roles.delete(id).await? {
            return Err(DomainError::SysRoleNotFound(id));
        }
        info!(id, "admin role deleted");
        Ok(())
    }

    /// Replaces the permissions granted by role `id`. Every id must name a
    /// live permission; repeats are ignored.
    pub async fn set_permissions(&self, id: i64, permission_ids: &[i64]) -> Result<Vec<i64>, DomainError> {
        self.ensure_exists(id).await?;
        let ids = dedup(permission_ids);
        let found = self.permissions.existing_ids(&ids).await?;
        ensure_all_found("permission", &ids, &found)?;

        self.roles.replace_permissions(id, &ids).await?;
        info!(id, granted = ids.len(), "admin role permissions replaced");
        Ok(ids)
    }

    /// Replaces the sidebar menus granted by role `id`.
    pub async fn set_menus(&self, id: i64, menu_ids: &[i64]) -> Result<Vec<i64>, DomainError> {
        self.ensure_exists(id).await?;
        let ids = dedup(menu_ids);
        let found = self.menus.existing_ids(&ids).await?;
        ensure_all_found("menu", &ids, &found)?;

        self.roles.replace_menus(id, &ids).await?;
        info!(id, granted = ids.len(), "admin role menus replaced");
        Ok(ids)
    }

    async fn ensure_exists(&self, id: i64) -> Result<(), DomainError> {
        match self.roles.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::SysRoleNotFound(id)),
        }
    }

    async fn ensure_unique(&self, name: &str, exclude_id: Option<i64>) -> Result<(), DomainError> {
        if let Some(existing) = self.roles.find_by_name(name, exclude_id).await? {
            warn!(existing = existing.id, name, "duplicate admin role name");
            return Err(DomainError::SysRoleNameAlreadyExists(name.to_string()));
        }
        Ok(())
    }
}

/// Sorted ids without repeats.
pub(crate) fn dedup(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Fails with the ids of `wanted` missing from `found`.
pub(crate) fn ensure_all_found(kind: &str, wanted: &[i64], found: &[i64]) -> Result<(), DomainError> {
    let missing: Vec<String> = wanted
        .iter()
        .filter(|id| !found.contains(id))
        .map(i64::to_string)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    warn!(kind, missing = ?missing, "grant references unknown ids");
    Err(DomainError::ReferenceNotFound(format!("{} {}", kind, missing.join(", "))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockMenuRepository, MockPermissionRepository, MockSysRoleRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    type Service = SysRoleService<MockSysRoleRepository, MockPermissionRepository, MockMenuRepository>;

    fn role(id: i64, name: &str) -> SysRole {
        let now = Utc::now();
        SysRole { id, name: name.into(), description: String::new(), created_at: now, updated_at: now }
    }

    fn service(roles: MockSysRoleRepository, permissions: MockPermissionRepository, menus: MockMenuRepository) -> Service {
        SysRoleService::new(Arc::new(roles), Arc::new(permissions), Arc::new(menus))
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let mut roles = MockSysRoleRepository::new();
        roles.expect_find_by_name()
            .with(eq("Editor"), eq(None::<i64>))
            .returning(|name, _| Ok(Some(role(3, name))));
        roles.expect_create().never();

        let err = service(roles, MockPermissionRepository::new(), MockMenuRepository::new())
            .create(NewSysRole { name: " Editor ".into(), description: String::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SysRoleNameAlreadyExists(ref n) if n == "Editor"));
    }

    #[tokio::test]
    async fn test_update_excludes_itself() {
        let mut roles = MockSysRoleRepository::new();
        roles.expect_find_by_name()
            .with(eq("Editor"), eq(Some(3)))
            .returning(|_, _| Ok(None));
        roles.expect_update().returning(|u| Ok(Some(role(u.id, &u.name))));

        let updated = service(roles, MockPermissionRepository::new(), MockMenuRepository::new())
            .update(SysRoleUpdate { id: 3, name: "Editor".into(), description: "catalog".into() })
            .await
            .unwrap();
        assert_eq!(updated.id, 3);
    }

    #[tokio::test]
    async fn test_get_includes_grants() {
        let mut roles = MockSysRoleRepository::new();
        roles.expect_find_by_id().with(eq(2)).returning(|id| Ok(Some(role(id, "Editor"))));
        roles.expect_permission_ids().with(eq(2)).returning(|_| Ok(vec![4, 9]));
        roles.expect_menu_ids().with(eq(2)).returning(|_| Ok(vec![1]));

        let detail = service(roles, MockPermissionRepository::new(), MockMenuRepository::new())
            .get(2)
            .await
            .unwrap();
        assert_eq!(detail.permission_ids, [4, 9]);
        assert_eq!(detail.menu_ids, [1]);
    }

    #[tokio::test]
    async fn test_set_permissions_dedups_and_replaces() {
        let mut roles = MockSysRoleRepository::new();
        roles.expect_find_by_id().returning(|id| Ok(Some(role(id, "Editor"))));
        roles.expect_replace_permissions()
            .withf(|id, ids| *id == 2 && ids == [3, 5, 8])
            .times(1)
            .returning(|_, _| Ok(()));
        let mut permissions = MockPermissionRepository::new();
        permissions.expect_existing_ids().returning(|ids| Ok(ids.to_vec()));

        let granted = service(roles, permissions, MockMenuRepository::new())
            .set_permissions(2, &[8, 3, 5, 3])
            .await
            .unwrap();
        assert_eq!(granted, [3, 5, 8]);
    }

    #[tokio::test]
    async fn test_set_permissions_rejects_unknown_ids() {
        let mut roles = MockSysRoleRepository::new();
        roles.expect_find_by_id().returning(|id| Ok(Some(role(id, "Editor"))));
        roles.expect_replace_permissions().never();
        let mut permissions = MockPermissionRepository::new();
        permissions.expect_existing_ids().returning(|_| Ok(vec![3]));

        let err = service(roles, permissions, MockMenuRepository::new())
            .set_permissions(2, &[3, 40, 41])
            .await
            .unwrap_err();
        match err {
            DomainError::ReferenceNotFound(detail) => assert_eq!(detail, "permission 40, 41"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_set_menus_can_clear_grants() {
        let mut roles = MockSysRoleRepository::new();
        roles.expect_find_by_id().returning(|id| Ok(Some(role(id, "Editor"))));
        roles.expect_replace_menus()
            .withf(|id, ids| *id == 2 && ids.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));
        let mut menus = MockMenuRepository::new();
        menus.expect_existing_ids().returning(|_| Ok(Vec::new()));

        let granted = service(roles, MockPermissionRepository::new(), menus)
            .set_menus(2, &[])
            .await
            .unwrap();
        assert!(granted.is_empty());
    }

    #[tokio::test]
    async fn test_grants_on_missing_role() {
        let mut roles = MockSysRoleRepository::new();
        roles.expect_find_by_id().returning(|_| Ok(None));
        roles.expect_replace_menus().never();

        let err = service(roles, MockPermissionRepository::new(), MockMenuRepository::new())
            .set_menus(77, &[1])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SysRoleNotFound(77)));
    }
}
