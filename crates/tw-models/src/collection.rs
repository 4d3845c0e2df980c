//! Loading record collections
//!
//! Collections arrive wholesale as JSON arrays. Each record is validated and
//! identifiers are checked for uniqueness before any query sees them.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;
use tw_core::error::TwError;
use tw_core::result::TwResult;
use tw_core::traits::{ensure_unique_ids, Identifiable};
use validator::Validate;

/// Validate every record and reject duplicate identifiers
pub fn validate_records<T: Validate + Identifiable>(records: &[T]) -> TwResult<()> {
    for record in records {
        record.validate().map_err(|errors| TwError::InvalidRecord {
            record: record.record_id(),
            message: errors.to_string(),
        })?;
    }
    ensure_unique_ids(records)
}

/// Parse a JSON array of records
pub fn parse_records<T>(json: &str) -> TwResult<Vec<T>>
where
    T: DeserializeOwned + Validate + Identifiable,
{
    let records: Vec<T> = serde_json::from_str(json)?;
    validate_records(&records)?;
    debug!(records = records.len(), "parsed record collection");
    Ok(records)
}

/// Read and parse a JSON array of records from disk
pub fn load_records<T>(path: impl AsRef<Path>) -> TwResult<Vec<T>>
where
    T: DeserializeOwned + Validate + Identifiable,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "reading record collection");
    let json = std::fs::read_to_string(path)?;
    parse_records(&json)
}
