use serde::Serialize;

use catalog_shared::constants::ROOT_PARENT_ID;

/// A flat row that knows its place in a hierarchy.
pub trait TreeRecord {
    fn id(&self) -> i64;

    /// `None` and `Some(0)` both mean "top level".
    fn parent_id(&self) -> Option<i64>;

    /// Display name, also the target of keyword filtering.
    fn label(&self) -> &str;

    fn is_root(&self) -> bool {
        matches!(self.parent_id(), None | Some(ROOT_PARENT_ID))
    }
}

/// One node of an assembled hierarchy. The payload's fields serialize next to
/// `children`, which is always present (empty for leaves).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn leaf(item: T) -> Self {
        Self { item, children: Vec::new() }
    }

    pub fn with_children(item: T, children: Vec<TreeNode<T>>) -> Self {
        Self { item, children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        let mut total = 0;
        self.walk(&mut |_, _| total += 1);
        total
    }

    /// Pre-order walk with the depth of each node (roots are depth 0).
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a TreeNode<T>, usize),
    {
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            f(node, depth);
            stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        }
    }
}

impl<T: TreeRecord> TreeNode<T> {
    pub fn id(&self) -> i64 {
        self.item.id()
    }

    pub fn label(&self) -> &str {
        self.item.label()
    }

    /// Depth-first lookup inside this subtree.
    pub fn find(&self, id: i64) -> Option<&TreeNode<T>> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.item.id() == id {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// Total number of nodes in a forest.
pub fn count_nodes<T>(forest: &[TreeNode<T>]) -> usize {
    forest.iter().map(TreeNode::size).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::row;

    fn sample() -> TreeNode<crate::tree::fixtures::Row> {
        TreeNode::with_children(
            row(1, 0, "Eyewear"),
            vec![
                TreeNode::with_children(row(2, 1, "Sunglasses"), vec![TreeNode::leaf(row(4, 2, "Aviator"))]),
                TreeNode::leaf(row(3, 1, "Reading")),
            ],
        )
    }

    #[test]
    fn test_size_and_find() {
        let tree = sample();
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.find(4).map(|n| n.label()), Some("Aviator"));
        assert!(tree.find(99).is_none());
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.walk(&mut |n, d| seen.push((n.id(), d)));
        assert_eq!(seen, vec![(1, 0), (2, 1), (4, 2), (3, 1)]);
    }

    #[test]
    fn test_root_sentinel() {
        assert!(row(1, 0, "a").is_root());
        assert!(!row(2, 1, "b").is_root());
    }

    #[test]
    fn test_serializes_flat_payload_with_children() {
        let json = serde_json::to_value(TreeNode::leaf(row(7, 0, "Frames"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 7, "parent_id": 0, "name": "Frames", "children": [] })
        );
    }
}
