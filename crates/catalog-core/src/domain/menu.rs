//! Admin sidebar menu entry

use serde::{Deserialize, Serialize};

use crate::tree::TreeRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    /// `None` (or `0` in legacy rows) for top-level entries.
    pub parent_id: Option<i64>,
    pub label: String,
    pub link_to: String,
    pub icon: String,
    pub order: i32,
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
