// ============================================================================
// Catalog Core - Permission Service
// File: crates/catalog-core/src/services/permission_service.rs
// ============================================================================

use std::sync::Arc;

use catalog_shared::constants::{MAX_TREE_DEPTH, ROOT_PARENT_ID};
use catalog_shared::{Page, Pagination};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::domain::{NewPermission, Permission, PermissionUpdate};
use crate::error::DomainError;
use crate::repositories::PermissionRepository;
use crate::tree::{check_parent_link, prune_tree, TreeBuilder, TreeNode};

pub struct PermissionService<R: PermissionRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PermissionRepository + ?Sized> PermissionService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Permission forest filtered by `query`; never paginated.
    pub async fn tree(&self, query: &str) -> Result<Vec<TreeNode<Permission>>, DomainError> {
        let rows = self.repo.list_all().await?;
        let forest = TreeBuilder::new().build(rows);
        if !forest.dropped.is_empty() {
            warn!(dropped = ?forest.dropped, "permissions unreachable from a root");
        }
        let roots = prune_tree(forest.roots, query);
        debug!(roots = roots.len(), query, "permission tree assembled");
        Ok(roots)
    }

    pub async fn list_all(&self) -> Result<Vec<Permission>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn page(&self, query: &str, pagination: Pagination) -> Result<Page<Permission>, DomainError> {
        let (items, total) = self.repo.list_page(query.trim(), pagination).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<Permission, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PermissionNotFound(id))
    }

    pub async fn create(&self, input: NewPermission) -> Result<Permission, DomainError> {
        let input = input.normalized()?;
        input.validate()?;
        self.ensure_parent(None, input.parent_id).await?;
        self.ensure_unique(&input.name, &input.route, &input.method, None).await?;

        let created = self.repo.create(&input).await?;
        info!(id = created.id, route = %created.route, method = %created.method, "permission created");
        Ok(created)
    }

    pub async fn update(&self, input: PermissionUpdate) -> Result<Permission, DomainError> {
        let input = input.normalized()?;
        input.validate()?;
        if input.parent_id == input.id {
            return Err(DomainError::SelfParent(input.id));
        }
        self.ensure_parent(Some(input.id), input.parent_id).await?;
        self.ensure_unique(&input.name, &input.route, &input.method, Some(input.id))
            .await?;

        let updated = self
            .repo
            .update(&input)
            .await?
            .ok_or(DomainError::PermissionNotFound(input.id))?;
        info!(id = updated.id, "permission updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::PermissionNotFound(id));
        }
        info!(id, "permission deleted");
        Ok(())
    }

    async fn ensure_parent(&self, id: Option<i64>, parent_id: i64) -> Result<(), DomainError> {
        if parent_id == ROOT_PARENT_ID {
            return Ok(());
        }
        let rows = self.repo.list_all().await?;
        if !rows.iter().any(|p| p.id == parent_id) {
            return Err(DomainError::ParentPermissionNotFound(parent_id));
        }
        check_parent_link(&rows, id, Some(parent_id), MAX_TREE_DEPTH).map_err(|e| {
            warn!(?id, parent_id, "permission parent rejected: {}", e);
            DomainError::from(e)
        })?;
        Ok(())
    }

    async fn ensure_unique(
        &self,
        name: &str,
        route: &str,
        method: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.repo.find_conflict(name, route, method, exclude_id).await? {
            warn!(existing = existing.id, name, route, method, "permission conflict");
            let detail = if existing.name == name {
                name.to_string()
            } else {
                format!("{} {}", method, route)
            };
            return Err(DomainError::PermissionAlreadyExists(detail));
        }
        Ok(())
    }
}
