// ============================================================================
// Catalog Core - Category Service
// File: crates/catalog-core/src/services/category_service.rs
// ============================================================================
//! Category management, the admin category table and the storefront
//! navigation tree.

use std::sync::Arc;

use catalog_shared::constants::{MAX_TREE_DEPTH, ROOT_PARENT_ID};
use catalog_shared::{Page, Pagination};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::domain::{CascaderOption, Category, CategoryUpdate, NewCategory};
use crate::error::DomainError;
use crate::repositories::CategoryRepository;
use crate::tree::{check_parent_link, prune_tree, TreeBuilder, TreeNode};

pub struct CategoryService<R: CategoryRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CategoryRepository + ?Sized> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_ordered().await
    }

    pub async fn get(&self, id: i64) -> Result<Category, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))
    }

    /// Full category forest filtered by `query` (empty keeps everything).
    pub async fn tree(&self, query: &str) -> Result<Vec<TreeNode<Category>>, DomainError> {
        let rows = self.repo.list_ordered().await?;
        let total_rows = rows.len();
        let forest = TreeBuilder::new().build(rows);
        if !forest.dropped.is_empty() {
            warn!(dropped = ?forest.dropped, "categories with a missing parent left out of the tree");
        }
        let roots = prune_tree(forest.roots, query);
        debug!(rows = total_rows, roots = roots.len(), query, "category tree assembled");
        Ok(roots)
    }

    /// Filtered forest paginated over its top-level entries.
    pub async fn tree_page(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> Result<Page<TreeNode<Category>>, DomainError> {
        let roots = self.tree(query).await?;
        Ok(pagination.slice(roots))
    }

    pub async fn cascader(&self) -> Result<Vec<CascaderOption>, DomainError> {
        let roots = self.tree("").await?;
        Ok(roots.into_iter().map(CascaderOption::from).collect())
    }

    pub async fn create(&self, input: NewCategory) -> Result<Category, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_parent(None, input.parent_id).await?;
        if self
            .repo
            .find_by_name_and_parent(&input.name, input.parent_id)
            .await?
            .is_some()
        {
            warn!(name = %input.name, parent_id = input.parent_id, "duplicate category name");
            return Err(DomainError::CategoryNameAlreadyExists(input.name));
        }

        let created = self.repo.create(&input).await?;
        info!(id = created.id, name = %created.name, "category created");
        Ok(created)
    }

    pub async fn update(&self, input: CategoryUpdate) -> Result<Category, DomainError> {
        let input = input.normalized();
        input.validate()?;
        if input.parent_id == input.id {
            return Err(DomainError::SelfParent(input.id));
        }
        self.ensure_parent(Some(input.id), input.parent_id).await?;

        let updated = self
            .repo
            .update(&input)
            .await?
            .ok_or(DomainError::CategoryNotFound(input.id))?;
        info!(id = updated.id, "category updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::CategoryNotFound(id));
        }
        info!(id, "category deleted");
        Ok(())
    }

    /// Finds or creates the `main / sub` pair and returns the sub-category id.
    pub async fn resolve_path(&self, main_name: &str, sub_name: &str) -> Result<i64, DomainError> {
        let main = self.find_or_create(main_name, ROOT_PARENT_ID).await?;
        let sub = self.find_or_create(sub_name, main.id).await?;
        Ok(sub.id)
    }

    async fn find_or_create(&self, name: &str, parent_id: i64) -> Result<Category, DomainError> {
        let name = name.trim();
        if let Some(existing) = self.repo.find_by_name_and_parent(name, parent_id).await? {
            return Ok(existing);
        }
        let input = NewCategory {
            name: name.to_string(),
            slug: slugify(name),
            description: String::new(),
            display_order: 0,
            parent_id,
        };
        input.validate()?;
        let created = self.repo.create(&input).await?;
        info!(id = created.id, parent_id, name, "category created from path");
        Ok(created)
    }

    /// The parent must exist, must not sit under `id`, and the result must
    /// stay within `MAX_TREE_DEPTH` levels.
    async fn ensure_parent(&self, id: Option<i64>, parent_id: i64) -> Result<(), DomainError> {
        if parent_id == ROOT_PARENT_ID {
            return Ok(());
        }
        let rows = self.repo.list_ordered().await?;
        if !rows.iter().any(|c| c.id == parent_id) {
            return Err(DomainError::ParentCategoryNotFound(parent_id));
        }
        let level = check_parent_link(&rows, id, Some(parent_id), MAX_TREE_DEPTH).map_err(|e| {
            warn!(?id, parent_id, "category parent rejected: {}", e);
            DomainError::from(e)
        })?;
        debug!(?id, parent_id, level, "category parent accepted");
        Ok(())
    }
}

/// Lower-case ASCII slug; anything else collapses into single dashes.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("category");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockCategoryRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn cat(id: i64, parent_id: i64, name: &str) -> Category {
        let now = Utc::now();
        Category {
            id,
            parent_id,
            name: name.to_string(),
            slug: slugify(name),
            description: String::new(),
            display_order: id,
            created_at: now,
            updated_at: now,
        }
    }

    fn rows() -> Vec<Category> {
        vec![
            cat(1, 0, "Eyewear"),
            cat(2, 1, "Sunglasses"),
            cat(3, 1, "Reading"),
            cat(4, 0, "Accessories"),
            cat(5, 4, "Cases"),
            cat(6, 0, "Lenses"),
            cat(7, 99, "Orphan"),
        ]
    }

    fn service(mock: MockCategoryRepository) -> CategoryService<MockCategoryRepository> {
        CategoryService::new(Arc::new(mock))
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Sun Glasses & More"), "sun-glasses-more");
        assert_eq!(slugify("  Ray-Ban  "), "ray-ban");
        assert_eq!(slugify("眼镜"), "category");
    }

    #[tokio::test]
    async fn test_tree_page_paginates_roots_after_filtering() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| Ok(rows()));
        let svc = service(mock);

        let page = svc.tree_page("", Pagination::new(1, 2)).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].item.name, "Eyewear");
        assert_eq!(page.items[0].children.len(), 2);

        let page = svc.tree_page("case", Pagination::new(1, 10)).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].item.name, "Accessories");
        assert_eq!(page.items[0].children[0].item.name, "Cases");
    }

    #[tokio::test]
    async fn test_tree_drops_orphans() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| Ok(rows()));
        let tree = service(mock).tree("orphan").await.unwrap();
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| Ok(rows()));
        let page = service(mock).tree_page("", Pagination::new(9, 10)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_cascader_shape() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| Ok(rows()));
        let options = service(mock).cascader().await.unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].children.as_ref().map(Vec::len), Some(2));
        assert!(options[2].children.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_parent() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| Ok(rows()));
        mock.expect_create().never();

        let err = service(mock)
            .create(NewCategory {
                name: "Kids".into(),
                slug: "kids".into(),
                description: String::new(),
                display_order: 0,
                parent_id: 42,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ParentCategoryNotFound(42)));
    }

    #[tokio::test]
    async fn test_create_lowercases_slug() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_find_by_name_and_parent()
            .with(eq("Blue Light"), eq(0))
            .returning(|_, _| Ok(None));
        mock.expect_create()
            .withf(|c| c.slug == "blue-light" && c.name == "Blue Light")
            .returning(|c| Ok(cat(10, c.parent_id, &c.name)));

        let created = service(mock)
            .create(NewCategory {
                name: " Blue Light ".into(),
                slug: "Blue-Light".into(),
                description: String::new(),
                display_order: 3,
                parent_id: 0,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 10);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| Ok(rows()));
        mock.expect_find_by_name_and_parent()
            .returning(|name, parent| Ok(Some(cat(2, parent, name))));
        mock.expect_create().never();

        let err = service(mock)
            .create(NewCategory {
                name: "Sunglasses".into(),
                slug: "sunglasses".into(),
                description: String::new(),
                display_order: 0,
                parent_id: 1,
            })
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_cannot_parent_itself() {
        let mock = MockCategoryRepository::new();
        let err = service(mock)
            .update(CategoryUpdate {
                id: 3,
                name: "Reading".into(),
                slug: "reading".into(),
                description: String::new(),
                display_order: 0,
                parent_id: 3,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SelfParent(3)));
    }

    fn update_of(id: i64, name: &str, parent_id: i64) -> CategoryUpdate {
        CategoryUpdate {
            id,
            name: name.into(),
            slug: slugify(name),
            description: String::new(),
            display_order: 0,
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_update_cannot_move_under_descendant() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered()
            .returning(|| Ok(vec![cat(1, 0, "Eyewear"), cat(2, 1, "Sunglasses")]));
        mock.expect_update().never();

        let err = service(mock).update(update_of(1, "Eyewear", 2)).await.unwrap_err();
        assert!(matches!(err, DomainError::ParentCycle { id: 1, parent_id: 2 }));
    }

    #[tokio::test]
    async fn test_update_rejects_deep_descendant_as_parent() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| {
            Ok(vec![cat(1, 0, "Eyewear"), cat(2, 1, "Sunglasses"), cat(3, 2, "Aviator"), cat(4, 3, "Gold")])
        });
        mock.expect_update().never();

        let err = service(mock).update(update_of(2, "Sunglasses", 4)).await.unwrap_err();
        assert!(matches!(err, DomainError::ParentCycle { id: 2, parent_id: 4 }));
    }

    #[tokio::test]
    async fn test_update_moves_to_sibling_branch() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| Ok(rows()));
        mock.expect_update()
            .withf(|u| u.id == 5 && u.parent_id == 1)
            .returning(|u| Ok(Some(cat(u.id, u.parent_id, &u.name))));

        let moved = service(mock).update(update_of(5, "Cases", 1)).await.unwrap();
        assert_eq!(moved.parent_id, 1);
    }

    #[tokio::test]
    async fn test_create_below_depth_limit_is_rejected() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_list_ordered().returning(|| {
            Ok((1..=MAX_TREE_DEPTH as i64).map(|id| cat(id, id - 1, &format!("Level {id}"))).collect())
        });
        mock.expect_create().never();

        let err = service(mock)
            .create(NewCategory {
                name: "Too deep".into(),
                slug: "too-deep".into(),
                description: String::new(),
                display_order: 0,
                parent_id: MAX_TREE_DEPTH as i64,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::TreeTooDeep(max) if max == MAX_TREE_DEPTH));
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_update().returning(|_| Ok(None));
        let err = service(mock)
            .update(CategoryUpdate {
                id: 77,
                name: "Gone".into(),
                slug: "gone".into(),
                description: String::new(),
                display_order: 0,
                parent_id: 0,
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_row() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_delete().with(eq(5)).returning(|_| Ok(false));
        assert!(matches!(service(mock).delete(5).await, Err(DomainError::CategoryNotFound(5))));
    }

    #[tokio::test]
    async fn test_resolve_path_creates_missing_sub() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_find_by_name_and_parent()
            .with(eq("Eyewear"), eq(0))
            .returning(|_, _| Ok(Some(cat(1, 0, "Eyewear"))));
        mock.expect_find_by_name_and_parent()
            .with(eq("Sports"), eq(1))
            .returning(|_, _| Ok(None));
        mock.expect_create()
            .withf(|c| c.parent_id == 1 && c.slug == "sports")
            .returning(|c| Ok(cat(12, c.parent_id, &c.name)));

        let id = service(mock).resolve_path(" Eyewear ", "Sports ").await.unwrap();
        assert_eq!(id, 12);
    }
}
