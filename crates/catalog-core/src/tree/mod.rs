//! # Hierarchy assembly
//!
//! Categories, permissions and menus are stored as flat `parent_id` tables.
//! This module turns such a snapshot into an owned forest and prunes it by a
//! keyword while keeping the ancestor chain of every match. Trees are built
//! fresh per call and never cached; the table stays the source of truth.
//!
//! Assembly and filtering use explicit stacks. Serializing, cloning and
//! dropping a [`TreeNode`] still recurse per level; writes are capped by
//! [`check_parent_link`] at `MAX_TREE_DEPTH` levels.

mod ancestry;
mod builder;
mod filter;
mod node;

pub use ancestry::{ancestor_path, check_parent_link, LinkError};
pub use builder::{build_tree, Forest, OrphanPolicy, TreeBuilder};
pub use filter::{filter_tree, prune_tree, LabelMatcher};
pub use node::{count_nodes, TreeNode, TreeRecord};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{TreeNode, TreeRecord};
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Row {
        pub id: i64,
        pub parent_id: i64,
        pub name: String,
    }

    impl TreeRecord for Row {
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

    pub fn row(id: i64, parent_id: i64, name: &str) -> Row {
        Row { id, parent_id, name: name.to_string() }
    }

    /// Eyewear (1)
    /// ├── Sunglasses (2)
    /// │   └── Polarized Sun (4)
    /// └── Reading (3)
    /// Accessories (5)
    /// └── Cases (6)
    pub fn catalog() -> Vec<Row> {
        vec![
            row(1, 0, "Eyewear"),
            row(2, 1, "Sunglasses"),
            row(3, 1, "Reading"),
            row(4, 2, "Polarized Sun"),
            row(5, 0, "Accessories"),
            row(6, 5, "Cases"),
        ]
    }

    /// A single path `1 -> 2 -> ... -> n`, listed leaf first.
    pub fn chain(n: i64) -> Vec<Row> {
        (1..=n).rev().map(|id| row(id, id - 1, &format!("level {id}"))).collect()
    }

    /// Tears a forest down one node at a time and returns how many nodes it
    /// held, so deep fixtures are not dropped recursively.
    pub fn dismantle(roots: Vec<TreeNode<Row>>) -> usize {
        let mut count = 0;
        let mut stack = roots;
        while let Some(mut node) = stack.pop() {
            count += 1;
            stack.append(&mut node.children);
        }
        count
    }
}
