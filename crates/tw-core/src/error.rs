//! Core error types for Tenderwatch
//!
//! Recoverable query conditions (empty results, stale pages, unknown sort
//! fields) never reach these types. Only malformed query specifications and
//! broken inputs do.

use thiserror::Error;

use crate::config::ConfigError;
use crate::types::FieldKind;

/// Core error type for all Tenderwatch operations
#[derive(Error, Debug)]
pub enum TwError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid record {record}: {message}")]
    InvalidRecord { record: String, message: String },

    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A query specification that can never be satisfied as written.
///
/// These indicate a defect in the calling code rather than bad user input,
/// so they are raised before any record is inspected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Filter on {field} expects a {expected} value, got {value:?}")]
    InvalidFilterValue {
        field: String,
        expected: FieldKind,
        value: String,
    },

    #[error("{filter} filter cannot be applied to {field} ({kind} field)")]
    IncompatibleFilter {
        field: String,
        filter: &'static str,
        kind: FieldKind,
    },

    #[error("Range filter on {field} has lower bound {min} above upper bound {max}")]
    InvertedRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Malformed filter expression: {0}")]
    MalformedFilter(String),

    #[error("Malformed sort expression: {0}")]
    MalformedSort(String),
}

impl TwError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TwError::Query(e) => e.error_code(),
            TwError::Config(_) => "configuration_error",
            TwError::InvalidRecord { .. } => "invalid_record",
            TwError::DuplicateId(_) => "duplicate_id",
            TwError::Io(_) => "io_error",
            TwError::Serialization(_) => "serialization_error",
        }
    }
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidFilterValue { .. } => "invalid_filter_value",
            QueryError::IncompatibleFilter { .. } => "incompatible_filter",
            QueryError::InvertedRange { .. } => "inverted_range",
            QueryError::MalformedFilter(_) => "malformed_filter",
            QueryError::MalformedSort(_) => "malformed_sort",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_messages() {
        let err = QueryError::IncompatibleFilter {
            field: "title".into(),
            filter: "range",
            kind: FieldKind::Text,
        };
        assert_eq!(
            err.to_string(),
            "range filter cannot be applied to title (text field)"
        );
        assert_eq!(err.error_code(), "incompatible_filter");
    }

    #[test]
    fn test_wrapped_error_code() {
        let err: TwError = QueryError::MalformedFilter("status".into()).into();
        assert_eq!(err.error_code(), "malformed_filter");
        assert!(err.to_string().starts_with("Query error:"));
    }
}
