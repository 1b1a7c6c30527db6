use std::collections::HashMap;

use tracing::debug;

use super::node::{TreeNode, TreeRecord};

/// What to do with a row whose parent is not part of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Leave the row and its whole subtree out of the forest.
    #[default]
    Drop,
    /// Attach the row as an extra root, at its scan position among the roots.
    PromoteToRoot,
}

/// Result of an assembly pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest<T> {
    pub roots: Vec<TreeNode<T>>,
    /// Ids left out of `roots`: repeated ids first, then every row that no
    /// root reaches (orphaned subtrees, cycles), in input order.
    pub dropped: Vec<i64>,
}

impl<T> Forest<T> {
    pub fn into_roots(self) -> Vec<TreeNode<T>> {
        self.roots
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    orphans: OrphanPolicy,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orphans(mut self, policy: OrphanPolicy) -> Self {
        self.orphans = policy;
        self
    }

    /// Assembles the rows into a forest. Siblings keep input order.
    pub fn build<T, I>(&self, records: I) -> Forest<T>
    where
        T: TreeRecord,
        I: IntoIterator<Item = T>,
    {
        let records = records.into_iter();
        let mut slots: Vec<Option<T>> = Vec::with_capacity(records.size_hint().0);
        let mut index: HashMap<i64, usize> = HashMap::with_capacity(slots.capacity());
        let mut dropped = Vec::new();

        for record in records {
            let id = record.id();
            if index.contains_key(&id) {
                dropped.push(id);
                continue;
            }
            index.insert(id, slots.len());
            slots.push(Some(record));
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); slots.len()];
        let mut roots = Vec::new();

        for (pos, record) in slots.iter().enumerate() {
            let Some(record) = record else { continue };
            if record.is_root() {
                roots.push(pos);
                continue;
            }
            match record.parent_id().and_then(|pid| index.get(&pid).copied()) {
                Some(parent) => children[parent].push(pos),
                None if self.orphans == OrphanPolicy::PromoteToRoot => roots.push(pos),
                None => {}
            }
        }

        let roots: Vec<TreeNode<T>> = roots
            .into_iter()
            .filter_map(|pos| assemble(pos, &mut slots, &children))
            .collect();

        dropped.extend(slots.iter().flatten().map(T::id));
        if !dropped.is_empty() {
            debug!(dropped = dropped.len(), "rows left out of the assembled tree");
        }

        Forest { roots, dropped }
    }
}

/// Moves the row at `pos` and everything under it out of `slots`. A row is
/// taken at most once, so a malformed index cannot produce duplicates. Works
/// off an explicit stack; chain length is bounded only by the input.
fn assemble<T>(pos: usize, slots: &mut [Option<T>], children: &[Vec<usize>]) -> Option<TreeNode<T>> {
    struct Frame<T> {
        pos: usize,
        item: T,
        next: usize,
        kids: Vec<TreeNode<T>>,
    }

    let item = slots[pos].take()?;
    let mut stack = vec![Frame { pos, item, next: 0, kids: Vec::with_capacity(children[pos].len()) }];

    while let Some(top) = stack.last_mut() {
        if let Some(&child) = children[top.pos].get(top.next) {
            top.next += 1;
            if let Some(item) = slots[child].take() {
                let kids = Vec::with_capacity(children[child].len());
                stack.push(Frame { pos: child, item, next: 0, kids });
            }
            continue;
        }

        let Some(done) = stack.pop() else { break };
        let node = TreeNode::with_children(done.item, done.kids);
        match stack.last_mut() {
            Some(parent) => parent.kids.push(node),
            None => return Some(node),
        }
    }
    None
}

/// Builds a forest with the default policy: orphaned rows are dropped.
pub fn build_tree<T, I>(records: I) -> Vec<TreeNode<T>>
where
    T: TreeRecord,
    I: IntoIterator<Item = T>,
{
    TreeBuilder::new().build(records).into_roots()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::count_nodes;
    use crate::tree::fixtures::{catalog, chain, dismantle, row, Row};

    fn labels(nodes: &[TreeNode<Row>]) -> Vec<&str> {
        nodes.iter().map(|n| n.label()).collect()
    }

    #[test]
    fn test_single_root_with_two_children_in_order() {
        let tree = build_tree(vec![
            row(1, 0, "Eyewear"),
            row(2, 1, "Sunglasses"),
            row(3, 1, "Reading"),
        ]);

        assert_eq!(labels(&tree), vec!["Eyewear"]);
        assert_eq!(labels(&tree[0].children), vec!["Sunglasses", "Reading"]);
        assert!(tree[0].children.iter().all(TreeNode::is_leaf));
    }

    #[test]
    fn test_roots_keep_input_order() {
        let tree = build_tree(vec![row(3, 0, "C"), row(1, 0, "A"), row(2, 0, "B")]);
        assert_eq!(labels(&tree), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_child_listed_before_parent_is_attached() {
        let tree = build_tree(vec![row(2, 1, "Child"), row(1, 0, "Parent")]);
        assert_eq!(tree.len(), 1);
        assert_eq!(labels(&tree[0].children), vec!["Child"]);
    }

    #[test]
    fn test_every_node_appears_once() {
        let rows = catalog();
        let total = rows.len();
        let tree = build_tree(rows);

        let mut ids = Vec::new();
        for root in &tree {
            root.walk(&mut |n, _| ids.push(n.id()));
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(count_nodes(&tree), total);
    }

    #[test]
    fn test_orphan_is_dropped_by_default() {
        let forest = TreeBuilder::new().build(vec![
            row(1, 0, "Eyewear"),
            row(5, 99, "Orphan"),
            row(6, 5, "Orphan child"),
        ]);

        assert_eq!(labels(&forest.roots), vec!["Eyewear"]);
        assert!(forest.roots[0].find(5).is_none());
        assert_eq!(forest.dropped, vec![5, 6]);
    }

    #[test]
    fn test_orphan_promoted_when_requested() {
        let forest = TreeBuilder::new()
            .orphans(OrphanPolicy::PromoteToRoot)
            .build(vec![row(5, 99, "Orphan"), row(1, 0, "Eyewear"), row(6, 5, "Child")]);

        assert_eq!(labels(&forest.roots), vec!["Orphan", "Eyewear"]);
        assert_eq!(labels(&forest.roots[0].children), vec!["Child"]);
        assert!(forest.dropped.is_empty());
    }

    #[test]
    fn test_cycles_are_dropped_without_looping() {
        let forest = TreeBuilder::new()
            .orphans(OrphanPolicy::PromoteToRoot)
            .build(vec![
                row(1, 0, "Root"),
                row(7, 7, "Self"),
                row(8, 9, "Ping"),
                row(9, 8, "Pong"),
            ]);

        assert_eq!(labels(&forest.roots), vec!["Root"]);
        assert_eq!(forest.dropped, vec![7, 8, 9]);
    }

    #[test]
    fn test_duplicate_id_keeps_first_row() {
        let forest = TreeBuilder::new().build(vec![
            row(1, 0, "First"),
            row(1, 0, "Second"),
            row(2, 1, "Child"),
        ]);

        assert_eq!(labels(&forest.roots), vec!["First"]);
        assert_eq!(count_nodes(&forest.roots), 2);
        assert_eq!(forest.dropped, vec![1]);
    }

    #[test]
    fn test_option_parent_none_is_root() {
        #[derive(Debug, Clone, PartialEq)]
        struct Menu {
            id: i64,
            parent_id: Option<i64>,
            label: String,
        }
        impl TreeRecord for Menu {
            fn id(&self) -> i64 {
                self.id
            }
            fn parent_id(&self) -> Option<i64> {
                self.parent_id
            }
            fn label(&self) -> &str {
                &self.label
            }
        }

        let tree = build_tree(vec![
            Menu { id: 1, parent_id: None, label: "Dashboard".into() },
            Menu { id: 2, parent_id: Some(1), label: "Stats".into() },
            Menu { id: 3, parent_id: Some(0), label: "Settings".into() },
        ]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children[0].item.label, "Stats");
    }

    #[test]
    fn test_empty_input() {
        let forest = TreeBuilder::new().build(Vec::<Row>::new());
        assert!(forest.roots.is_empty());
        assert!(forest.dropped.is_empty());
    }

    #[test]
    fn test_very_deep_chain_builds_without_recursion() {
        let forest = TreeBuilder::new().build(chain(200_000));
        assert_eq!(forest.roots.len(), 1);
        assert!(forest.dropped.is_empty());

        let mut deepest = 0;
        forest.roots[0].walk(&mut |_, d| deepest = deepest.max(d));
        assert_eq!(deepest, 199_999);
        assert_eq!(dismantle(forest.roots), 200_000);
    }
}
