//! # tw-queries
//!
//! List queries for Tenderwatch.
//!
//! Every listing page runs the same pipeline over an in-memory collection:
//! filters, then free-text search, then a stable sort, then one page is cut
//! out of the result. Summary pages additionally roll tenders up by procuring
//! entity or county before querying the roll-ups.
//!
//! ## Structure
//!
//! - `filters` - Field filters and their compiled predicates
//! - `search` - Free-text search over a list of fields
//! - `sorts` - Sort orders and null-last value comparison
//! - `query` - The query description handed to the engine
//! - `builder` - Fluent API for constructing queries, plus per-page presets
//! - `engine` - Runs a query against a collection
//! - `aggregate` - Group-by roll-ups
//!
//! ## Example
//!
//! ```
//! use tw_models::MockGenerator;
//! use tw_queries::builder::presets;
//! use tw_queries::engine::QueryEngine;
//!
//! let tenders = MockGenerator::new(42).tenders(50);
//!
//! let query = presets::tenders()
//!     .search("road")
//!     .risk_level("high|critical")
//!     .sort_by_desc("riskScore")
//!     .page_size(5)
//!     .build();
//!
//! let page = QueryEngine::default().execute(&tenders, &query).unwrap();
//! assert!(page.items.len() <= 5);
//! ```

pub mod aggregate;
pub mod builder;
pub mod engine;
pub mod filters;
pub mod query;
pub mod search;
pub mod sorts;

// Re-exports for convenience
pub use aggregate::{
    county_summaries, entity_summaries, group_aggregate, risk_distribution, sort_by_sum_desc,
    GroupSummary,
};
pub use builder::{presets, QueryBuilder};
pub use engine::QueryEngine;
pub use filters::{Filter, FilterSet, FilterValue};
pub use query::QuerySpec;
pub use search::SearchSpec;
pub use sorts::{SortCriterion, SortDirection, SortOrder};
