//! Pagination types for query results
//!
//! Page numbers are 1-indexed. Out-of-range requests are clamped rather than
//! rejected: widgets routinely hold a stale page number after a filter
//! change shrinks the result set.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Pagination parameters as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageRequest {
    /// Keep the raw values; clamping happens on read
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Effective page number, at least 1
    pub fn page(&self) -> usize {
        usize::try_from(self.page.max(1)).unwrap_or(usize::MAX)
    }

    /// Effective page size, at least 1
    pub fn page_size(&self) -> usize {
        usize::try_from(self.page_size.max(1)).unwrap_or(usize::MAX)
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}

/// Number of pages needed for `total` items; never less than 1
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// One page of query results plus the metadata a listing needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// Records that survived filtering and search, before slicing
    pub total_matched: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> PageResult<T> {
    /// Slice an already filtered and ordered collection
    pub fn paginate(matched: Vec<T>, request: &PageRequest) -> Self {
        let page_size = request.page_size();
        let total_matched = matched.len();
        let items = matched
            .into_iter()
            .skip(request.offset())
            .take(page_size)
            .collect();

        Self {
            items,
            total_matched,
            total_pages: total_pages(total_matched, page_size),
            page: request.page(),
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_matched: self.total_matched,
            total_pages: self.total_pages,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 10);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(PageRequest::new(0, 10).page(), 1);
        assert_eq!(PageRequest::new(-5, 10).page(), 1);
        assert_eq!(PageRequest::new(1, 0).page_size(), 1);
        assert_eq!(PageRequest::new(1, -3).page_size(), 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_paginate_slices() {
        let page = PageResult::paginate((1..=25).collect(), &PageRequest::new(3, 10));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_matched, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
    }

    #[test]
    fn test_stale_page_is_empty() {
        let page = PageResult::paginate((1..=7).collect::<Vec<_>>(), &PageRequest::new(2, 10));
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = PageResult::paginate(vec![1, 2, 3], &PageRequest::new(i64::MAX, i64::MAX));
        assert!(page.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = PageResult::paginate(vec!["a"], &PageRequest::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalMatched"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["pageSize"], 10);
    }
}
