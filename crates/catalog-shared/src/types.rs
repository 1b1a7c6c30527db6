//! Common types

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub type EntityId = i64;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Page request as sent by the admin tables (`currentPage`, `pageSize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { current_page: DEFAULT_PAGE, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl Pagination {
    pub fn new(current_page: u32, page_size: u32) -> Self {
        Self { current_page, page_size }.normalized(MAX_PAGE_SIZE)
    }

    /// Clamps zero values to the defaults and caps the page size.
    pub fn normalized(self, max_page_size: u32) -> Self {
        let current_page = self.current_page.max(1);
        let page_size = match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(max_page_size.max(1)),
        };
        Self { current_page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.current_page) - 1).max(0) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        total.div_ceil(u64::from(self.page_size))
    }

    /// Slices an in-memory list; a page past the end is empty.
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len() as u64;
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let page_items = items
            .into_iter()
            .skip(start)
            .take(self.page_size as usize)
            .collect();
        Page::new(page_items, total, *self)
    }
}

/// One page of results plus the counters the admin tables render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            current_page: pagination.current_page,
            page_size: pagination.page_size,
            total_pages: pagination.total_pages(total),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_total_pages() {
        let p = Pagination::new(3, 10);
        assert_eq!(p.offset(), 20);
        assert_eq!(p.total_pages(21), 3);
        assert_eq!(p.total_pages(0), 0);
    }

    #[test]
    fn test_normalized_clamps_values() {
        let p = Pagination { current_page: 0, page_size: 0 }.normalized(50);
        assert_eq!(p, Pagination { current_page: 1, page_size: DEFAULT_PAGE_SIZE });

        let p = Pagination { current_page: 2, page_size: 500 }.normalized(50);
        assert_eq!(p.page_size, 50);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let page = Pagination::new(5, 2).slice(vec![1, 2, 3]);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_slice_last_partial_page() {
        let page = Pagination::new(2, 2).slice(vec!["a", "b", "c"]);
        assert_eq!(page.items, vec!["c"]);
        assert_eq!(page.current_page, 2);
    }
}
