//! Query Builder
//!
//! Provides a fluent API for constructing queries with search, filters,
//! sorts and paging.

use crate::filters::{Filter, FilterSet, FilterValue};
use crate::query::QuerySpec;
use crate::search::SearchSpec;
use crate::sorts::{SortCriterion, SortOrder};

/// Builder for constructing queries fluently
#[derive(Debug, Default)]
pub struct QueryBuilder {
    name: Option<String>,
    search_text: Option<String>,
    search_fields: Vec<String>,
    filters: FilterSet,
    sorts: SortOrder,
    page: Option<i64>,
    page_size: Option<i64>,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // Search methods

    /// Set the fields free-text search looks in
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the search text. Without search fields, a non-blank search
    /// matches nothing.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Set the search text and the fields it looks in
    pub fn search_in<I, S>(self, text: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields(fields).search(text)
    }

    // Filter methods

    /// Add a raw filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.add(filter);
        self
    }

    /// Set a dropdown-style filter, replacing any earlier one on the field
    pub fn choose(mut self, field: impl Into<String>, selection: &str) -> Self {
        self.filters
            .set(Filter::new(field, FilterValue::choice(selection)));
        self
    }

    /// Filter by status label, e.g. `"Flagged"` or `"open|in progress"`
    pub fn status(self, selection: &str) -> Self {
        self.choose("status", selection)
    }

    /// Filter by county
    pub fn county(self, selection: &str) -> Self {
        self.choose("county", selection)
    }

    /// Filter by risk bucket, e.g. `"high|critical"`
    pub fn risk_level(self, selection: &str) -> Self {
        self.choose("riskLevel", selection)
    }

    /// Filter by tender category
    pub fn category(self, selection: &str) -> Self {
        self.choose("category", selection)
    }

    /// Filter by amount, both bounds inclusive
    pub fn amount_between(mut self, min: f64, max: f64) -> Self {
        self.filters.set(Filter::between("amount", min, max));
        self
    }

    /// Filter by risk score, both bounds inclusive
    pub fn risk_between(mut self, min: u32, max: u32) -> Self {
        self.filters
            .set(Filter::between("riskScore", f64::from(min), f64::from(max)));
        self
    }

    /// Only records marked as flagged
    pub fn flagged_only(mut self) -> Self {
        self.filters.set(Filter::flag("isFlagged", true));
        self
    }

    // Sort methods

    /// Set sort order
    pub fn sort(mut self, sorts: SortOrder) -> Self {
        self.sorts = sorts;
        self
    }

    /// Sort by field ascending
    pub fn sort_by_asc(mut self, field: impl Into<String>) -> Self {
        self.sorts = SortOrder::by_asc(field);
        self
    }

    /// Sort by field descending
    pub fn sort_by_desc(mut self, field: impl Into<String>) -> Self {
        self.sorts = SortOrder::by_desc(field);
        self
    }

    /// Add secondary sort ascending
    pub fn then_by_asc(mut self, field: impl Into<String>) -> Self {
        self.sorts.add(SortCriterion::asc(field));
        self
    }

    /// Add secondary sort descending
    pub fn then_by_desc(mut self, field: impl Into<String>) -> Self {
        self.sorts.add(SortCriterion::desc(field));
        self
    }

    // Paging

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Build the query
    pub fn build(self) -> QuerySpec {
        QuerySpec {
            name: self.name,
            search: self
                .search_text
                .map(|text| SearchSpec::new(text, self.search_fields)),
            filters: self.filters,
            sorts: self.sorts,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Starting points for each listing page, with the search fields and
/// default ordering that page uses
pub mod presets {
    use super::*;
    use tw_models::investigation::attributes as investigation;
    use tw_models::report::attributes as report;
    use tw_models::summary::attributes as summary;
    use tw_models::supplier::attributes as supplier;
    use tw_models::tender::attributes as tender;

    /// Tender listing: search by title, reference number or procuring entity
    pub fn tenders() -> QueryBuilder {
        QueryBuilder::new().name("Tenders").search_fields([
            tender::TITLE,
            tender::TENDER_NUMBER,
            tender::PROCURING_ENTITY,
        ])
    }

    /// Supplier listing: search by name, registration number or county
    pub fn suppliers() -> QueryBuilder {
        QueryBuilder::new().name("Suppliers").search_fields([
            supplier::NAME,
            supplier::REGISTRATION_NUMBER,
            supplier::COUNTY,
        ])
    }

    /// Investigation listing, most recently opened first
    pub fn investigations() -> QueryBuilder {
        QueryBuilder::new()
            .name("Investigations")
            .search_fields([
                investigation::TITLE,
                investigation::CASE_NUMBER,
                investigation::DESCRIPTION,
            ])
            .sort_by_desc(investigation::OPENED_DATE)
    }

    /// Procuring entity roll-ups, largest spend first
    pub fn entities() -> QueryBuilder {
        QueryBuilder::new()
            .name("Entities")
            .search_fields([summary::NAME])
            .sort_by_desc(summary::TOTAL_SPENT)
    }

    /// Public reports awaiting triage
    pub fn reports() -> QueryBuilder {
        QueryBuilder::new().name("Public reports").search_fields([
            report::TITLE,
            report::DESCRIPTION,
            report::TRACKING_ID,
        ])
    }

    /// Open tenders rated high or critical, riskiest first
    pub fn high_risk_tenders() -> QueryBuilder {
        tenders()
            .name("High risk tenders")
            .status("published|flagged|under_investigation")
            .risk_level("high|critical")
            .sort_by_desc(tender::RISK_SCORE)
            .then_by_desc(tender::AMOUNT)
    }
}
