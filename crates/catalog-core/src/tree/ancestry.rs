use std::collections::{HashMap, HashSet};

use thiserror::Error;

use catalog_shared::constants::ROOT_PARENT_ID;

use super::node::TreeRecord;

/// Why a proposed `parent_id` was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("{node} cannot move under its own descendant {parent}")]
    Cycle { node: i64, parent: i64 },

    #[error("hierarchy would be deeper than {max} levels")]
    TooDeep { max: usize },
}

/// Checks that hanging `node` (`None` for a row not stored yet) under
/// `parent` keeps the snapshot a forest at most `max_depth` levels deep,
/// counting the subtree that moves along with `node`.
///
/// Returns the level `node` would sit at, top level being 1. Parents missing
/// from the snapshot end the walk; existence is checked by the caller.
pub fn check_parent_link<T: TreeRecord>(
    records: &[T],
    node: Option<i64>,
    parent: Option<i64>,
    max_depth: usize,
) -> Result<usize, LinkError> {
    let parents: HashMap<i64, Option<i64>> = records.iter().map(|r| (r.id(), r.parent_id())).collect();
    let non_root = |id: Option<i64>| id.filter(|&id| id != ROOT_PARENT_ID);

    let mut level = 1;
    let mut cursor = non_root(parent);
    while let Some(ancestor) = cursor {
        if Some(ancestor) == node {
            return Err(LinkError::Cycle {
                node: ancestor,
                parent: parent.unwrap_or(ancestor),
            });
        }
        level += 1;
        // Also ends walks around a loop already stored in the table.
        if level > max_depth {
            return Err(LinkError::TooDeep { max: max_depth });
        }
        cursor = non_root(parents.get(&ancestor).copied().flatten());
    }

    let height = node.map_or(1, |id| subtree_height(records, id));
    if level + height - 1 > max_depth {
        return Err(LinkError::TooDeep { max: max_depth });
    }
    Ok(level)
}

/// Ids from the top level down to `id`, `id` included. The walk stops at a
/// missing parent, a repeated id or after `max_depth` steps.
pub fn ancestor_path<T: TreeRecord>(records: &[T], id: i64, max_depth: usize) -> Vec<i64> {
    let parents: HashMap<i64, Option<i64>> = records.iter().map(|r| (r.id(), r.parent_id())).collect();
    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = Some(id).filter(|id| parents.contains_key(id));
    while let Some(current) = cursor {
        if path.len() == max_depth || !seen.insert(current) {
            break;
        }
        path.push(current);
        cursor = parents
            .get(&current)
            .copied()
            .flatten()
            .filter(|&pid| pid != ROOT_PARENT_ID && parents.contains_key(&pid));
    }
    path.reverse();
    path
}

/// Levels in the subtree under `root`, `root` included.
fn subtree_height<T: TreeRecord>(records: &[T], root: i64) -> usize {
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for record in records.iter().filter(|r| !r.is_root()) {
        if let Some(pid) = record.parent_id() {
            children.entry(pid).or_default().push(record.id());
        }
    }

    let mut seen = HashSet::from([root]);
    let mut level = vec![root];
    let mut height = 0;
    while !level.is_empty() {
        height += 1;
        level = level
            .iter()
            .filter_map(|id| children.get(id))
            .flatten()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
    }
    height
}
