use super::node::{TreeNode, TreeRecord};

/// Case-insensitive substring test on labels. Folding is Unicode lower-casing
/// without normalization; an empty needle matches every label.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    needle: String,
}

impl LabelMatcher {
    pub fn new(query: &str) -> Self {
        Self { needle: query.to_lowercase() }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, label: &str) -> bool {
        self.needle.is_empty() || label.to_lowercase().contains(&self.needle)
    }
}

/// Returns a new forest holding every node whose label matches `query` plus
/// all of its ancestors. The input is left untouched.
pub fn filter_tree<T>(roots: &[TreeNode<T>], query: &str) -> Vec<TreeNode<T>>
where
    T: TreeRecord + Clone,
{
    let matcher = LabelMatcher::new(query);
    if matcher.is_empty() {
        return roots.to_vec();
    }
    filter_borrowed(roots, &matcher)
}

fn filter_borrowed<T>(roots: &[TreeNode<T>], matcher: &LabelMatcher) -> Vec<TreeNode<T>>
where
    T: TreeRecord + Clone,
{
    struct Frame<'a, T> {
        node: &'a TreeNode<T>,
        next: usize,
        kept: Vec<TreeNode<T>>,
    }

    let mut out = Vec::new();
    for root in roots {
        let mut stack = vec![Frame { node: root, next: 0, kept: Vec::new() }];
        while let Some(top) = stack.last_mut() {
            let node = top.node;
            if let Some(child) = node.children.get(top.next) {
                top.next += 1;
                stack.push(Frame { node: child, next: 0, kept: Vec::new() });
                continue;
            }

            let Some(done) = stack.pop() else { break };
            if !matcher.matches(done.node.label()) && done.kept.is_empty() {
                continue;
            }
            let kept = TreeNode::with_children(done.node.item.clone(), done.kept);
            match stack.last_mut() {
                Some(parent) => parent.kept.push(kept),
                None => out.push(kept),
            }
        }
    }
    out
}

/// Same selection as [`filter_tree`], consuming the forest instead of cloning.
pub fn prune_tree<T>(roots: Vec<TreeNode<T>>, query: &str) -> Vec<TreeNode<T>>
where
    T: TreeRecord,
{
    let matcher = LabelMatcher::new(query);
    if matcher.is_empty() {
        return roots;
    }
    prune_owned(roots, &matcher)
}

fn prune_owned<T>(roots: Vec<TreeNode<T>>, matcher: &LabelMatcher) -> Vec<TreeNode<T>>
where
    T: TreeRecord,
{
    struct Frame<T> {
        item: T,
        pending: std::vec::IntoIter<TreeNode<T>>,
        kept: Vec<TreeNode<T>>,
    }

    impl<T> Frame<T> {
        fn open(node: TreeNode<T>) -> Self {
            let TreeNode { item, children } = node;
            Self { item, pending: children.into_iter(), kept: Vec::new() }
        }
    }

    let mut out = Vec::new();
    for root in roots {
        let mut stack = vec![Frame::open(root)];
        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.pending.next() {
                stack.push(Frame::open(child));
                continue;
            }

            let Some(done) = stack.pop() else { break };
            if !matcher.matches(done.item.label()) && done.kept.is_empty() {
                continue;
            }
            let kept = TreeNode::with_children(done.item, done.kept);
            match stack.last_mut() {
                Some(parent) => parent.kept.push(kept),
                None => out.push(kept),
            }
        }
    }
    out
}
