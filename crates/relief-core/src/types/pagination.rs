//! Page requests and paged listings.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// A 1-based page of `page_size` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping both values into range.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows to skip. Saturates at `i64::MAX` so any `?page=` value binds as
    /// a valid SQL `OFFSET` and simply yields an empty page.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a listing plus the counts a client needs to page through it.
/// An empty listing still reports one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, page: &PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(page.page_size).max(1);
        Self {
            items,
            page: page.page,
            page_size: page.page_size,
            total_items,
            total_pages,
        }
    }

    /// Slice an already-filtered, already-ordered list into one page.
    pub fn from_vec(all: Vec<T>, page: &PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit() as usize)
            .collect();
        Self::new(items, page, total)
    }

    /// Transform every item while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(0, 1000);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_from_vec_slices_and_counts() {
        let page = PageRequest::new(2, 2);
        let resp = PageResponse::from_vec(vec![1, 2, 3, 4, 5], &page);
        assert_eq!(resp.items, vec![3, 4]);
        assert_eq!(resp.total_items, 5);
        assert_eq!(resp.total_pages, 3);
    }

    #[test]
    fn test_huge_page_is_empty_not_overflow() {
        let page = PageRequest::new(u64::MAX, MAX_PAGE_SIZE);
        assert_eq!(page.offset(), i64::MAX as u64);

        let resp = PageResponse::from_vec(vec![1, 2, 3], &page);
        assert!(resp.items.is_empty());
        assert_eq!(resp.total_items, 3);
    }

    #[test]
    fn test_empty_has_one_page() {
        let resp: PageResponse<u8> = PageResponse::from_vec(vec![], &PageRequest::default());
        assert_eq!(resp.total_pages, 1);
        assert!(resp.items.is_empty());
    }
}
