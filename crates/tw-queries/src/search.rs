//! Free-text search
//!
//! A search matches a record when the text occurs, ignoring case, in any one
//! of the configured fields.

use tw_core::traits::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    text: String,
    fields: Vec<String>,
}

impl SearchSpec {
    pub fn new<I, S>(text: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Empty or whitespace-only text restricts nothing
    pub fn is_active(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Prepare the search for matching; surrounding whitespace is part of
    /// the needle. Returns `None` when it restricts nothing
    pub fn matcher(&self) -> Option<SearchMatcher<'_>> {
        self.is_active().then(|| SearchMatcher {
            needle: self.text.to_lowercase(),
            fields: &self.fields,
        })
    }
}

/// A search with its text lower-cased once up front
#[derive(Debug)]
pub struct SearchMatcher<'a> {
    needle: String,
    fields: &'a [String],
}

impl SearchMatcher<'_> {
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.fields.iter().any(|name| {
            record
                .field(name)
                .filter(|value| !value.is_null())
                .is_some_and(|value| value.to_string().to_lowercase().contains(&self.needle))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_models::tender::attributes;
    use tw_models::{MockGenerator, Tender};

    fn tender(title: &str, entity: &str) -> Tender {
        let mut tender = MockGenerator::new(9).tenders(1).remove(0);
        tender.title = title.to_string();
        tender.procuring_entity = entity.to_string();
        tender.awarded_supplier_name = None;
        tender
    }

    fn search(text: &str) -> SearchSpec {
        SearchSpec::new(
            text,
            [
                attributes::TITLE,
                attributes::PROCURING_ENTITY,
                attributes::AWARDED_SUPPLIER_NAME,
            ],
        )
    }

    #[test]
    fn test_case_insensitive_substring() {
        let tender = tender("Road Construction - Nairobi", "Kenya Rural Roads Authority");
        let spec = search("ROAD");
        let matcher = spec.matcher().unwrap();
        assert!(matcher.matches(&tender));
    }

    #[test]
    fn test_any_field_matches() {
        let tender = tender("Borehole Drilling", "Kenya Power");
        assert!(search("power").matcher().unwrap().matches(&tender));
        assert!(!search("hospital").matcher().unwrap().matches(&tender));
    }

    #[test]
    fn test_blank_search_is_inactive() {
        assert!(search("").matcher().is_none());
        assert!(search("   ").matcher().is_none());
        assert!(search(" road ").is_active());
    }

    #[test]
    fn test_surrounding_whitespace_is_matched() {
        let kitui = tender("Kitui Borehole", "Kitui County");
        let equipment = tender("IT Equipment", "Ministry of ICT");
        let spec = search("it ");
        let matcher = spec.matcher().unwrap();
        assert!(!matcher.matches(&kitui));
        assert!(matcher.matches(&equipment));
    }

    #[test]
    fn test_unknown_and_unset_fields_never_match() {
        let tender = tender("Borehole Drilling", "Kenya Power");
        let spec = SearchSpec::new("drill", ["nonexistent", attributes::AWARDED_SUPPLIER_NAME]);
        assert!(!spec.matcher().unwrap().matches(&tender));
    }
}
