//! Core traits shared by records and the query engine

use std::collections::HashSet;

use crate::error::TwError;
use crate::result::TwResult;
use crate::types::{FieldDef, FieldKind, FieldValue};

/// Primary key type for numerically keyed records
pub type Id = i64;

/// Trait for records that carry an identifier unique within their collection
pub trait Identifiable {
    fn record_id(&self) -> String;
}

/// A record the query engine can filter, search and sort.
///
/// The engine only ever reaches a record through named fields, so the same
/// pipeline serves tenders, suppliers, investigations and derived roll-ups.
pub trait Record {
    /// Every field this record exposes, with its declared kind
    fn fields() -> &'static [FieldDef];

    /// Read a field by name.
    ///
    /// Returns `None` for names the record does not know and
    /// `Some(FieldValue::Null)` for known fields that are unset.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    fn field_kind(name: &str) -> Option<FieldKind> {
        Self::fields()
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.kind)
    }

    fn has_field(name: &str) -> bool {
        Self::field_kind(name).is_some()
    }
}

/// Reject collections where two records share an identifier
pub fn ensure_unique_ids<T: Identifiable>(records: &[T]) -> TwResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.record_id();
        if !seen.insert(id.clone()) {
            return Err(TwError::DuplicateId(id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: i64,
        name: Option<String>,
    }

    const ROW_FIELDS: &[FieldDef] = &[
        FieldDef::new("id", FieldKind::Integer),
        FieldDef::new("name", FieldKind::Text),
    ];

    impl Identifiable for Row {
        fn record_id(&self) -> String {
            self.id.to_string()
        }
    }

    impl Record for Row {
        fn fields() -> &'static [FieldDef] {
            ROW_FIELDS
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "id" => Some(self.id.into()),
                "name" => Some(self.name.as_deref().into()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_field_lookup() {
        let row = Row { id: 1, name: None };
        assert_eq!(Row::field_kind("name"), Some(FieldKind::Text));
        assert!(!Row::has_field("missing"));
        assert_eq!(row.field("name"), Some(FieldValue::Null));
        assert_eq!(row.field("missing"), None);
    }

    #[test]
    fn test_unique_ids() {
        let rows = vec![
            Row { id: 1, name: None },
            Row { id: 2, name: Some("b".into()) },
        ];
        assert!(ensure_unique_ids(&rows).is_ok());

        let dupes = vec![Row { id: 1, name: None }, Row { id: 1, name: None }];
        assert!(matches!(
            ensure_unique_ids(&dupes),
            Err(TwError::DuplicateId(id)) if id == "1"
        ));
    }
}
