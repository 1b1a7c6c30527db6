// ============================================================================
// Catalog Core - Menu Service
// File: crates/catalog-core/src/services/menu_service.rs
// ============================================================================

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::Menu;
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::tree::{OrphanPolicy, TreeBuilder, TreeNode};

pub struct MenuService<R: MenuRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: MenuRepository + ?Sized> MenuService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Navigation tree granted to a back-office user through their roles.
    pub async fn menus_for(&self, sys_user_id: i64) -> Result<Vec<TreeNode<Menu>>, DomainError> {
        let menus = self.repo.list_for_sys_user(sys_user_id).await?;
        let forest = TreeBuilder::new().build(menus);
        if !forest.dropped.is_empty() {
            // A child granted without its parent is not shown.
            warn!(sys_user_id, dropped = ?forest.dropped, "menus unreachable from a granted root");
        }
        debug!(sys_user_id, roots = forest.roots.len(), "menu tree assembled");
        Ok(forest.roots)
    }

    /// Every menu, for picking the menus an admin role grants. Entries whose
    /// parent is gone are listed at the top level so they can still be granted
    /// or cleaned up.
    pub async fn tree_all(&self) -> Result<Vec<TreeNode<Menu>>, DomainError> {
        let menus = self.repo.list_all().await?;
        let forest = TreeBuilder::new().orphans(OrphanPolicy::PromoteToRoot).build(menus);
        if !forest.dropped.is_empty() {
            warn!(dropped = ?forest.dropped, "menus in a parent loop left out of the picker");
        }
        Ok(forest.roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMenuRepository;
    use mockall::predicate::eq;

    fn menu(id: i64, parent_id: Option<i64>, label: &str, order: i32) -> Menu {
        Menu {
            id,
            parent_id,
            label: label.to_string(),
            link_to: format!("/{}", label.to_lowercase()),
            icon: String::new(),
            order,
        }
    }

    #[tokio::test]
    async fn test_menus_keep_repository_order() {
        let mut mock = MockMenuRepository::new();
        mock.expect_list_for_sys_user().with(eq(3)).returning(|_| {
            Ok(vec![
                menu(10, None, "Catalog", 9),
                menu(12, Some(10), "Brands", 5),
                menu(11, Some(10), "Categories", 2),
                menu(20, Some(0), "Settings", 1),
            ])
        });

        let tree = MenuService::new(Arc::new(mock)).menus_for(3).await.unwrap();
        assert_eq!(tree.len(), 2);
        let labels: Vec<&str> = tree[0].children.iter().map(|n| n.item.label.as_str()).collect();
        assert_eq!(labels, ["Brands", "Categories"]);
        assert_eq!(tree[1].item.label, "Settings");
    }

    #[tokio::test]
    async fn test_child_without_granted_parent_is_hidden() {
        let mut mock = MockMenuRepository::new();
        mock.expect_list_for_sys_user()
            .returning(|_| Ok(vec![menu(11, Some(10), "Categories", 2)]));

        let tree = MenuService::new(Arc::new(mock)).menus_for(3).await.unwrap();
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_picker_lists_orphans_at_top_level() {
        let mut mock = MockMenuRepository::new();
        mock.expect_list_all().returning(|| {
            Ok(vec![
                menu(10, None, "Catalog", 9),
                menu(11, Some(10), "Categories", 2),
                menu(30, Some(99), "Reports", 1),
            ])
        });
        mock.expect_list_for_sys_user().never();

        let tree = MenuService::new(Arc::new(mock)).tree_all().await.unwrap();
        let labels: Vec<&str> = tree.iter().map(|n| n.item.label.as_str()).collect();
        assert_eq!(labels, ["Catalog", "Reports"]);
        assert_eq!(tree[0].children.len(), 1);
    }
}
