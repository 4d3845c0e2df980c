//! Query Model
//!
//! A `QuerySpec` is the full state of one listing page: search box, filter
//! widgets, sort column and pager. It is plain data; running it is the
//! engine's job.

use tw_core::pagination::PageRequest;

use crate::filters::{Filter, FilterSet};
use crate::search::SearchSpec;
use crate::sorts::{SortCriterion, SortOrder};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    /// Name of the listing this query was built for
    pub name: Option<String>,
    pub search: Option<SearchSpec>,
    pub filters: FilterSet,
    pub sorts: SortOrder,
    /// 1-indexed; values below 1 are treated as 1
    pub page: Option<i64>,
    /// Values below 1 are treated as 1
    pub page_size: Option<i64>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.add(filter);
        self
    }

    /// Add a sort criterion
    pub fn with_sort(mut self, criterion: SortCriterion) -> Self {
        self.sorts.add(criterion);
        self
    }

    pub fn with_search(mut self, search: SearchSpec) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Check if the query has any restricting filters
    pub fn has_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// Check if the query has a non-blank search
    pub fn has_search(&self) -> bool {
        self.search.as_ref().is_some_and(SearchSpec::is_active)
    }

    pub fn is_sorted(&self) -> bool {
        !self.sorts.is_empty()
    }

    /// The pager state, falling back to the first page and `default_page_size`
    pub fn page_request(&self, default_page_size: i64) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
        )
    }

    /// The same query on another page
    pub fn for_page(&self, page: i64) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }
}
