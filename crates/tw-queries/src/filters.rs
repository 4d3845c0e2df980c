//! Query Filters
//!
//! A filter is a condition on one named field of a record. Filters in a
//! [`FilterSet`] combine with AND semantics. Before a query touches any
//! record, each filter is compiled against the record type's declared fields
//! into a [`CompiledFilter`]; mismatches between filter shape and field kind
//! surface there as [`QueryError`]s.

use chrono::NaiveDate;
use tracing::debug;
use tw_core::error::QueryError;
use tw_core::result::QueryResult;
use tw_core::traits::Record;
use tw_core::types::{normalize_label, parse_date, FieldKind, FieldValue};

/// Sentinel value meaning "no restriction"
pub const ALL: &str = "all";

/// Filter value types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// No restriction
    All,
    /// Field equals this value
    Exact(String),
    /// Field equals any of these values
    OneOf(Vec<String>),
    /// Numeric range, both bounds inclusive and optional
    Range { min: Option<f64>, max: Option<f64> },
    /// Calendar-day range, both bounds inclusive and optional
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    /// Boolean field equals this value
    Flag(bool),
}

impl FilterValue {
    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact(value.into())
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Range { min, max }
    }

    pub fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self::DateRange { from, to }
    }

    /// Parse the textual form used on the command line and in page widgets.
    ///
    /// - `all` (any case) or an empty string → [`FilterValue::All`]
    /// - `a|b|c` → [`FilterValue::OneOf`]
    /// - `lo..hi`, `lo..`, `..hi` → [`FilterValue::Range`] when the bounds are
    ///   numbers, [`FilterValue::DateRange`] when they are `YYYY-MM-DD` dates
    /// - anything else → [`FilterValue::Exact`]
    pub fn parse(raw: &str) -> QueryResult<Self> {
        let raw = raw.trim();
        match raw.split_once("..") {
            Some((lo, hi)) => Self::parse_range(raw, lo.trim(), hi.trim()),
            None => Ok(Self::choice(raw)),
        }
    }

    /// The selection of a dropdown widget: `all`, one value, or `a|b|c`
    pub fn choice(raw: &str) -> Self {
        let raw = raw.trim();
        if is_all_token(raw) {
            return Self::All;
        }
        if !raw.contains('|') {
            return Self::Exact(raw.to_string());
        }

        let values: Vec<String> = raw
            .split('|')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();
        if values.iter().any(|v| is_all_token(v)) {
            Self::All
        } else {
            Self::OneOf(values)
        }
    }

    fn parse_range(raw: &str, lo: &str, hi: &str) -> QueryResult<Self> {
        if lo.is_empty() && hi.is_empty() {
            return Err(QueryError::MalformedFilter(raw.to_string()));
        }

        let number = |s: &str| s.parse::<f64>().ok().filter(|n| n.is_finite());
        if let (Some(min), Some(max)) = (parse_bound(lo, number), parse_bound(hi, number)) {
            return Ok(Self::Range { min, max });
        }

        if let (Some(from), Some(to)) = (parse_bound(lo, parse_date), parse_bound(hi, parse_date)) {
            return Ok(Self::DateRange { from, to });
        }

        Err(QueryError::MalformedFilter(raw.to_string()))
    }

    /// True when the value restricts nothing: `All`, or an exact or one-of
    /// value that carries the `all` sentinel
    pub fn is_all(&self) -> bool {
        match self {
            Self::All => true,
            Self::Exact(value) => is_all_token(value),
            Self::OneOf(values) => values.iter().any(|v| is_all_token(v)),
            _ => false,
        }
    }

    /// Short name of the filter shape, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Exact(_) => "exact",
            Self::OneOf(_) => "one-of",
            Self::Range { .. } => "range",
            Self::DateRange { .. } => "date range",
            Self::Flag(_) => "flag",
        }
    }
}

fn is_all_token(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case(ALL)
}

/// An empty bound parses to `Some(None)`; an unparseable one to `None`
fn parse_bound<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    if raw.is_empty() {
        Some(None)
    } else {
        parse(raw).map(Some)
    }
}

/// A single filter condition
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// The field being filtered (e.g., "status", "county")
    pub field: String,
    /// The values to filter by
    pub value: FilterValue,
}

impl Filter {
    /// Create a new filter
    pub fn new(field: impl Into<String>, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    /// Create an equals filter
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterValue::exact(value))
    }

    /// Create a filter matching any of several values
    pub fn one_of<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(field, FilterValue::one_of(values))
    }

    /// Create an inclusive numeric range filter
    pub fn between(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(field, FilterValue::range(Some(min), Some(max)))
    }

    /// Create a boolean filter
    pub fn flag(field: impl Into<String>, value: bool) -> Self {
        Self::new(field, FilterValue::Flag(value))
    }

    /// Parse `field=value`, with the value in [`FilterValue::parse`] syntax
    pub fn parse(raw: &str) -> QueryResult<Self> {
        let (field, value) = raw
            .split_once('=')
            .ok_or_else(|| QueryError::MalformedFilter(raw.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(QueryError::MalformedFilter(raw.to_string()));
        }
        Ok(Self::new(field, FilterValue::parse(value)?))
    }

    /// Check this filter against the fields of `T` and build its predicate.
    ///
    /// A filter carrying the `all` sentinel compiles to a predicate that
    /// always matches, whatever field it names. Any other filter on a field `T` does not declare
    /// compiles to one that never matches.
    pub fn compile<T: Record>(&self) -> QueryResult<CompiledFilter> {
        let predicate = match (&self.value, T::field_kind(&self.field)) {
            (FilterValue::All, _) => Predicate::Always,
            (value, _) if value.is_all() => Predicate::Always,
            (_, None) => {
                debug!(field = %self.field, "filter on unknown field matches nothing");
                Predicate::Never
            }
            (FilterValue::Exact(value), Some(kind)) => {
                self.equality(kind, std::slice::from_ref(value))?
            }
            (FilterValue::OneOf(values), Some(kind)) => self.equality(kind, values)?,
            (FilterValue::Range { min, max }, Some(kind)) => {
                if !kind.is_numeric() {
                    return Err(self.incompatible(kind));
                }
                if let Some(bound) = min.iter().chain(max).find(|n| !n.is_finite()) {
                    return Err(self.invalid(kind, &bound.to_string()));
                }
                if let (Some(lo), Some(hi)) = (min, max) {
                    if lo > hi {
                        return Err(QueryError::InvertedRange {
                            field: self.field.clone(),
                            min: lo.to_string(),
                            max: hi.to_string(),
                        });
                    }
                }
                Predicate::NumberRange {
                    min: *min,
                    max: *max,
                }
            }
            (FilterValue::DateRange { from, to }, Some(kind)) => {
                if kind != FieldKind::Date {
                    return Err(self.incompatible(kind));
                }
                if let (Some(lo), Some(hi)) = (from, to) {
                    if lo > hi {
                        return Err(QueryError::InvertedRange {
                            field: self.field.clone(),
                            min: lo.to_string(),
                            max: hi.to_string(),
                        });
                    }
                }
                Predicate::DateRange {
                    from: *from,
                    to: *to,
                }
            }
            (FilterValue::Flag(value), Some(kind)) => {
                if kind != FieldKind::Bool {
                    return Err(self.incompatible(kind));
                }
                Predicate::FlagIn(vec![*value])
            }
        };

        Ok(CompiledFilter {
            field: self.field.clone(),
            predicate,
        })
    }

    fn equality(&self, kind: FieldKind, values: &[String]) -> QueryResult<Predicate> {
        let predicate = match kind {
            FieldKind::Text => Predicate::TextIn(values.iter().map(|v| v.to_lowercase()).collect()),
            FieldKind::Enum => Predicate::LabelIn(values.iter().map(|v| normalize_label(v)).collect()),
            FieldKind::Integer | FieldKind::Number => Predicate::NumberIn(
                values
                    .iter()
                    .map(|v| {
                        v.trim()
                            .parse::<f64>()
                            .ok()
                            .filter(|n| n.is_finite())
                            .ok_or_else(|| self.invalid(kind, v))
                    })
                    .collect::<QueryResult<_>>()?,
            ),
            FieldKind::Date => Predicate::DateIn(
                values
                    .iter()
                    .map(|v| parse_date(v).ok_or_else(|| self.invalid(kind, v)))
                    .collect::<QueryResult<_>>()?,
            ),
            FieldKind::Bool => Predicate::FlagIn(
                values
                    .iter()
                    .map(|v| parse_flag(v).ok_or_else(|| self.invalid(kind, v)))
                    .collect::<QueryResult<_>>()?,
            ),
        };
        Ok(predicate)
    }

    fn invalid(&self, expected: FieldKind, value: &str) -> QueryError {
        QueryError::InvalidFilterValue {
            field: self.field.clone(),
            expected,
            value: value.to_string(),
        }
    }

    fn incompatible(&self, kind: FieldKind) -> QueryError {
        QueryError::IncompatibleFilter {
            field: self.field.clone(),
            filter: self.value.kind_name(),
            kind,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Always,
    Never,
    /// Lower-cased candidates
    TextIn(Vec<String>),
    /// Normalised enumeration labels
    LabelIn(Vec<String>),
    NumberIn(Vec<f64>),
    NumberRange { min: Option<f64>, max: Option<f64> },
    DateIn(Vec<NaiveDate>),
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    FlagIn(Vec<bool>),
}

/// A filter checked against a record type, ready to test records
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    field: String,
    predicate: Predicate,
}

impl CompiledFilter {
    pub fn field(&self) -> &str {
        &self.field
    }

    /// True when this filter lets every record through
    pub fn is_noop(&self) -> bool {
        self.predicate == Predicate::Always
    }

    /// Test one record. Unset fields never satisfy a restricting filter.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match self.predicate {
            Predicate::Always => return true,
            Predicate::Never => return false,
            _ => {}
        }

        let Some(value) = record.field(&self.field) else {
            return false;
        };

        match (&self.predicate, &value) {
            (Predicate::TextIn(wanted), FieldValue::Text(text)) => {
                let text = text.to_lowercase();
                wanted.iter().any(|w| *w == text)
            }
            (Predicate::LabelIn(wanted), FieldValue::Text(label)) => {
                wanted.iter().any(|w| w == label.as_ref())
            }
            (Predicate::NumberIn(wanted), value) => value
                .as_f64()
                .is_some_and(|n| wanted.iter().any(|w| *w == n)),
            (Predicate::NumberRange { min, max }, value) => value.as_f64().is_some_and(|n| {
                min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
            }),
            (Predicate::DateIn(wanted), FieldValue::Date(date)) => wanted.contains(date),
            (Predicate::DateRange { from, to }, FieldValue::Date(date)) => {
                from.map_or(true, |lo| *date >= lo) && to.map_or(true, |hi| *date <= hi)
            }
            (Predicate::FlagIn(wanted), FieldValue::Bool(flag)) => wanted.contains(flag),
            _ => false,
        }
    }
}

/// Filter set - a collection of filters with AND semantics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Create a new empty filter set
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a filter to the set
    pub fn add(&mut self, filter: Filter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Add a filter and return self (builder pattern)
    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Replace any filters on the same field, as a page widget does when
    /// its selection changes
    pub fn set(&mut self, filter: Filter) -> &mut Self {
        self.remove_filters_for(&filter.field);
        self.filters.push(filter);
        self
    }

    /// Get all filters
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Check if any filters are set
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Get number of filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if any filter actually restricts results
    pub fn is_active(&self) -> bool {
        self.filters.iter().any(|f| !f.value.is_all())
    }

    /// Get filters for a specific field
    pub fn filters_for(&self, field: &str) -> Vec<&Filter> {
        self.filters.iter().filter(|f| f.field == field).collect()
    }

    /// Remove filters for a specific field
    pub fn remove_filters_for(&mut self, field: &str) {
        self.filters.retain(|f| f.field != field);
    }

    /// Compile every filter for `T`, dropping the ones that restrict nothing
    pub fn compile<T: Record>(&self) -> QueryResult<Vec<CompiledFilter>> {
        let mut compiled = Vec::with_capacity(self.filters.len());
        for filter in &self.filters {
            let filter = filter.compile::<T>()?;
            if !filter.is_noop() {
                compiled.push(filter);
            }
        }
        Ok(compiled)
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}
