//! Query Sort Orders
//!
//! Sort orders define how query results are ordered. Criteria apply in
//! sequence, each breaking ties left by the one before it. Unset values sort
//! last whichever way a criterion points.

use std::cmp::Ordering;
use tw_core::error::QueryError;
use tw_core::result::QueryResult;
use tw_core::traits::Record;
use tw_core::types::FieldValue;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 1-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-1, newest first)
    Desc,
}

impl SortDirection {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// A single sort criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCriterion {
    /// The field to sort by
    pub field: String,
    /// The sort direction
    pub direction: SortDirection,
}

impl SortCriterion {
    /// Create a new sort criterion
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create ascending sort
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create descending sort
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Parse `field`, `field:asc` or `field:desc`
    pub fn parse(raw: &str) -> QueryResult<Self> {
        let raw = raw.trim();
        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (
                field.trim(),
                SortDirection::from_str(direction.trim())
                    .ok_or_else(|| QueryError::MalformedSort(raw.to_string()))?,
            ),
            None => (raw, SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(QueryError::MalformedSort(raw.to_string()));
        }
        Ok(Self::new(field, direction))
    }
}

/// Collection of sort criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    criteria: Vec<SortCriterion>,
}

impl SortOrder {
    /// Create a new empty sort order
    pub fn new() -> Self {
        Self { criteria: vec![] }
    }

    /// Create with a single criterion
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            criteria: vec![SortCriterion::new(field, direction)],
        }
    }

    /// Create with ascending sort on single field
    pub fn by_asc(field: impl Into<String>) -> Self {
        Self::by(field, SortDirection::Asc)
    }

    /// Create with descending sort on single field
    pub fn by_desc(field: impl Into<String>) -> Self {
        Self::by(field, SortDirection::Desc)
    }

    /// Parse a comma separated list, e.g. `riskScore:desc,title`
    pub fn parse(raw: &str) -> QueryResult<Self> {
        raw.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(SortCriterion::parse)
            .collect::<QueryResult<Vec<_>>>()
            .map(|criteria| Self { criteria })
    }

    /// Add a sort criterion
    pub fn add(&mut self, criterion: SortCriterion) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    /// Add a sort criterion (builder pattern)
    pub fn then(mut self, criterion: SortCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Add ascending sort
    pub fn then_asc(self, field: impl Into<String>) -> Self {
        self.then(SortCriterion::asc(field))
    }

    /// Get all sort criteria
    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    /// Check if any sort is defined
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Get number of sort criteria
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Get the primary (first) sort criterion
    pub fn primary(&self) -> Option<&SortCriterion> {
        self.criteria.first()
    }

    /// Criteria naming fields that `T` declares, in order
    pub fn known_for<T: Record>(&self) -> Vec<&SortCriterion> {
        self.criteria
            .iter()
            .filter(|c| T::has_field(&c.field))
            .collect()
    }

    /// Criteria naming fields that `T` does not declare
    pub fn unknown_for<T: Record>(&self) -> Vec<&SortCriterion> {
        self.criteria
            .iter()
            .filter(|c| !T::has_field(&c.field))
            .collect()
    }
}

/// Compare two field values under a direction, with unset values last.
///
/// `None` (field missing) and [`FieldValue::Null`] are both unset. Text
/// compares case-insensitively, falling back to byte order so distinct
/// strings never tie; numbers compare numerically across integer and float.
pub fn compare_values(
    a: Option<&FieldValue<'_>>,
    b: Option<&FieldValue<'_>>,
    direction: SortDirection,
) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_present(a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

fn compare_present(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
    }
}

/// Compare two pre-extracted sort keys criterion by criterion
pub fn compare_keys(
    a: &[Option<FieldValue<'_>>],
    b: &[Option<FieldValue<'_>>],
    directions: &[SortDirection],
) -> Ordering {
    a.iter()
        .zip(b)
        .zip(directions)
        .map(|((a, b), direction)| compare_values(a.as_ref(), b.as_ref(), *direction))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
