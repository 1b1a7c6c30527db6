// ============================================================================
// Catalog Core - Category Entity
// File: crates/catalog-core/src/domain/category.rs
// Description: Product category, stored flat with a parent reference
// ============================================================================

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use catalog_shared::utils::normalize_slug;

use crate::tree::{TreeNode, TreeRecord};

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug pattern"));

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// `0` for top-level categories.
    pub parent_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TreeRecord for Category {
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

/// Create payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"))]
    #[validate(regex(path = *SLUG_PATTERN, message = "Slug may only contain a-z, 0-9 and single dashes"))]
    pub slug: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: String,

    #[serde(default)]
    pub display_order: i64,

    #[serde(default, alias = "pid")]
    pub parent_id: i64,
}

impl NewCategory {
    /// Trims the name and lower-cases the slug before validation.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.slug = normalize_slug(&self.slug);
        self.description = self.description.trim().to_string();
        self
    }
}

/// Update payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryUpdate {
    /// Taken from the request path when absent from the body.
    #[serde(default)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"))]
    #[validate(regex(path = *SLUG_PATTERN, message = "Slug may only contain a-z, 0-9 and single dashes"))]
    pub slug: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: String,

    #[serde(default)]
    pub display_order: i64,

    #[serde(default, alias = "pid")]
    pub parent_id: i64,
}

impl CategoryUpdate {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.slug = normalize_slug(&self.slug);
        self.description = self.description.trim().to_string();
        self
    }
}

/// Node shape of the category cascade picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascaderOption {
    pub value: i64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CascaderOption>>,
}

impl From<TreeNode<Category>> for CascaderOption {
    fn from(node: TreeNode<Category>) -> Self {
        let children = (!node.children.is_empty())
            .then(|| node.children.into_iter().map(CascaderOption::from).collect());
        Self {
            value: node.item.id,
            label: node.item.name,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_category(name: &str, slug: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            display_order: 0,
            parent_id: 0,
        }
    }

    #[test]
    fn test_slug_is_lowercased_before_validation() {
        let c = new_category("  Sunglasses ", "Sun-Glasses").normalized();
        assert_eq!(c.name, "Sunglasses");
        assert_eq!(c.slug, "sun-glasses");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_slug_and_empty_name() {
        assert!(new_category("Frames", "frames now!").normalized().validate().is_err());
        assert!(new_category("   ", "frames").normalized().validate().is_err());
    }

    #[test]
    fn test_pid_alias_is_accepted() {
        let c: NewCategory =
            serde_json::from_str(r#"{"name":"Reading","slug":"reading","pid":3}"#).unwrap();
        assert_eq!(c.parent_id, 3);
    }

    #[test]
    fn test_cascader_omits_children_on_leaves() {
        let now = Utc::now();
        let cat = |id, parent_id, name: &str| Category {
            id,
            parent_id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: String::new(),
            display_order: 0,
            created_at: now,
            updated_at: now,
        };
        let node = TreeNode::with_children(cat(1, 0, "Eyewear"), vec![TreeNode::leaf(cat(2, 1, "Reading"))]);

        let json = serde_json::to_value(CascaderOption::from(node)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "value": 1,
                "label": "Eyewear",
                "children": [{ "value": 2, "label": "Reading" }]
            })
        );
    }
}
