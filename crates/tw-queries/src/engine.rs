//! Query execution
//!
//! Runs a [`QuerySpec`] over an in-memory collection in four steps:
//! filters, free-text search, stable sort, then pagination. Filters are
//! compiled against the record type first, so a malformed query fails before
//! any record is read.

use tracing::debug;
use tw_core::config::QueryConfig;
use tw_core::pagination::PageResult;
use tw_core::result::QueryResult;
use tw_core::traits::Record;
use tw_core::types::FieldValue;

use crate::query::QuerySpec;
use crate::search::SearchSpec;
use crate::sorts::{compare_keys, SortDirection};

#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    config: QueryConfig,
}

impl QueryEngine {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Run a query and return one page of borrowed records.
    ///
    /// A page past the end is empty rather than an error; `total_pages` is
    /// always at least 1.
    pub fn execute<'a, T: Record>(
        &self,
        records: &'a [T],
        query: &QuerySpec,
    ) -> QueryResult<PageResult<&'a T>> {
        let matched = self.select(records, query)?;
        let request = query.page_request(self.config.default_page_size);
        let page = PageResult::paginate(matched, &request);

        debug!(
            query = query.name.as_deref().unwrap_or("adhoc"),
            scanned = records.len(),
            total_matched = page.total_matched,
            page = page.page,
            page_size = page.page_size,
            returned = page.items.len(),
            "query executed"
        );
        Ok(page)
    }

    /// Every record matching the query, in sorted order, without paging
    pub fn select<'a, T: Record>(
        &self,
        records: &'a [T],
        query: &QuerySpec,
    ) -> QueryResult<Vec<&'a T>> {
        let filters = query.filters.compile::<T>()?;
        let search = query.search.as_ref().and_then(SearchSpec::matcher);

        let matched: Vec<&'a T> = records
            .iter()
            .filter(|record| filters.iter().all(|filter| filter.matches(*record)))
            .filter(|record| search.as_ref().map_or(true, |s| s.matches(*record)))
            .collect();

        for criterion in query.sorts.unknown_for::<T>() {
            debug!(field = %criterion.field, "skipping sort on unknown field");
        }

        let criteria = query.sorts.known_for::<T>();
        if criteria.is_empty() {
            return Ok(matched);
        }

        let directions: Vec<SortDirection> = criteria.iter().map(|c| c.direction).collect();
        let mut keyed: Vec<(Vec<Option<FieldValue<'a>>>, &'a T)> = matched
            .into_iter()
            .map(|record| {
                let key = criteria.iter().map(|c| record.field(&c.field)).collect();
                (key, record)
            })
            .collect();

        // sort_by is stable: ties keep their input order
        keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, &directions));

        Ok(keyed.into_iter().map(|(_, record)| record).collect())
    }

    /// Number of records matching the query
    pub fn count<T: Record>(&self, records: &[T], query: &QuerySpec) -> QueryResult<usize> {
        let filters = query.filters.compile::<T>()?;
        let search = query.search.as_ref().and_then(SearchSpec::matcher);
        Ok(records
            .iter()
            .filter(|record| filters.iter().all(|filter| filter.matches(*record)))
            .filter(|record| search.as_ref().map_or(true, |s| s.matches(*record)))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{presets, QueryBuilder};
    use crate::filters::{Filter, FilterValue};
    use crate::sorts::SortCriterion;
    use tw_core::error::QueryError;
    use tw_models::tender::attributes;
    use tw_models::{MockGenerator, Tender, TenderStatus};

    fn tenders(count: usize) -> Vec<Tender> {
        MockGenerator::new(11).tenders(count)
    }

    #[test]
    fn test_filter_by_status() {
        let mut records = tenders(25);
        for (i, tender) in records.iter_mut().enumerate() {
            tender.status = if i % 9 == 0 {
                TenderStatus::Flagged
            } else {
                TenderStatus::Published
            };
        }

        let query = QueryBuilder::new().status("Flagged").page(1).page_size(10).build();
        let page = QueryEngine::default().execute(&records, &query).unwrap();

        assert_eq!(page.total_matched, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.len(), 3);
        assert!(page.items.iter().all(|t| t.status == TenderStatus::Flagged));
    }

    #[test]
    fn test_sort_by_risk_descending() {
        let mut records = tenders(12);
        for (i, tender) in records.iter_mut().enumerate() {
            tender.risk_score = ((i * 37) % 97) as u32;
        }
        let max = records.iter().map(|t| t.risk_score).max().unwrap();

        let query = QueryBuilder::new()
            .sort_by_desc(attributes::RISK_SCORE)
            .page(1)
            .page_size(5)
            .build();
        let page = QueryEngine::default().execute(&records, &query).unwrap();

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].risk_score, max);
        assert!(page.items.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let records = tenders(7);
        let query = QueryBuilder::new().page(2).page_size(10).build();
        let page = QueryEngine::default().execute(&records, &query).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_matched, 7);
    }

    #[test]
    fn test_search_title() {
        let mut records = tenders(2);
        records[0].title = "Road Construction Project".to_string();
        records[1].title = "IT Equipment".to_string();

        let query = QueryBuilder::new().search_in("road", [attributes::TITLE]).build();
        let page = QueryEngine::default().execute(&records, &query).unwrap();

        assert_eq!(page.total_matched, 1);
        assert_eq!(page.items[0].id, records[0].id);
    }

    #[test]
    fn test_all_sentinel_is_noop() {
        let records = tenders(20);
        for filter in [
            Filter::new(attributes::COUNTY, FilterValue::All),
            Filter::equals(attributes::COUNTY, "all"),
            Filter::one_of(attributes::STATUS, ["all"]),
        ] {
            let query = QueryBuilder::new().filter(filter).page_size(50).build();
            let page = QueryEngine::default().execute(&records, &query).unwrap();
            assert_eq!(page.total_matched, 20);
        }
    }

    #[test]
    fn test_pager_clamps() {
        let records = tenders(15);
        let query = QueryBuilder::new().page(-3).page_size(0).build();
        let page = QueryEngine::default().execute(&records, &query).unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 15);
    }

    #[test]
    fn test_default_page_size_from_config() {
        let records = tenders(30);
        let engine = QueryEngine::new(QueryConfig {
            default_page_size: 25,
            ..QueryConfig::default()
        });
        let page = engine.execute(&records, &QuerySpec::new()).unwrap();
        assert_eq!(page.page_size, 25);
        assert_eq!(page.items.len(), 25);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_empty_collection() {
        let records: Vec<Tender> = vec![];
        let page = QueryEngine::default()
            .execute(&records, &presets::tenders().build())
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_matched, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_unset_values_sort_last() {
        let mut records = tenders(6);
        for (i, tender) in records.iter_mut().enumerate() {
            tender.award_date = if i % 2 == 0 {
                None
            } else {
                chrono::NaiveDate::from_ymd_opt(2024, 1, i as u32)
            };
        }

        for criterion in [
            SortCriterion::asc(attributes::AWARD_DATE),
            SortCriterion::desc(attributes::AWARD_DATE),
        ] {
            let query = QuerySpec::new().with_sort(criterion);
            let sorted = QueryEngine::default().select(&records, &query).unwrap();
            assert!(sorted[..3].iter().all(|t| t.award_date.is_some()));
            assert!(sorted[3..].iter().all(|t| t.award_date.is_none()));
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let mut records = tenders(20);
        for (i, tender) in records.iter_mut().enumerate() {
            tender.risk_score = if i % 2 == 0 { 40 } else { 90 };
        }

        let query = QuerySpec::new().with_sort(SortCriterion::desc(attributes::RISK_SCORE));
        let sorted = QueryEngine::default().select(&records, &query).unwrap();

        let high: Vec<i64> = sorted[..10].iter().map(|t| t.id).collect();
        let low: Vec<i64> = sorted[10..].iter().map(|t| t.id).collect();
        assert!(high.windows(2).all(|w| w[0] < w[1]));
        assert!(low.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unknown_sort_key_skipped() {
        let records = tenders(10);
        let query = QuerySpec::new().with_sort(SortCriterion::desc("bogus"));
        let sorted = QueryEngine::default().select(&records, &query).unwrap();
        let ids: Vec<i64> = sorted.iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_secondary_sort_breaks_ties() {
        let mut records = tenders(4);
        records[0].risk_score = 60;
        records[0].title = "b".into();
        records[1].risk_score = 60;
        records[1].title = "a".into();
        records[2].risk_score = 90;
        records[3].risk_score = 10;

        let query = QueryBuilder::new()
            .sort_by_desc(attributes::RISK_SCORE)
            .then_by_asc(attributes::TITLE)
            .build();
        let sorted = QueryEngine::default().select(&records, &query).unwrap();
        let ids: Vec<i64> = sorted.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_invalid_filter_fails_before_scan() {
        let records = tenders(5);
        let query = QueryBuilder::new().amount_between(10.0, 1.0).build();
        let err = QueryEngine::default().execute(&records, &query).unwrap_err();
        assert!(matches!(err, QueryError::InvertedRange { .. }));

        let empty: Vec<Tender> = vec![];
        assert!(QueryEngine::default().execute(&empty, &query).is_err());

        let query = QueryBuilder::new()
            .filter(Filter::new(
                attributes::RISK_SCORE,
                FilterValue::range(Some(f64::NAN), None),
            ))
            .build();
        let err = QueryEngine::default().execute(&records, &query).unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilterValue { .. }));
    }

    #[test]
    fn test_filters_then_search_compose() {
        let mut records = tenders(4);
        records[0].title = "Road upgrade".into();
        records[0].county = "Kisumu".into();
        records[1].title = "Road repair".into();
        records[1].county = "Nairobi".into();
        records[2].title = "Clinic".into();
        records[2].county = "Kisumu".into();
        records[3].title = "Roads".into();
        records[3].county = "Kisumu".into();

        let query = QueryBuilder::new()
            .county("kisumu")
            .search_in("road", [attributes::TITLE])
            .build();
        let engine = QueryEngine::default();
        let page = engine.execute(&records, &query).unwrap();
        let ids: Vec<i64> = page.items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(engine.count(&records, &query).unwrap(), 2);
    }
}
