//! Investigation model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tw_core::traits::{Id, Identifiable, Record};
use tw_core::types::{FieldDef, FieldKind, FieldValue};
use validator::Validate;

use crate::labels::label_enum;

label_enum! {
    /// Investigation case status
    pub enum InvestigationStatus {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        PendingReview => "PENDING_REVIEW",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

label_enum! {
    /// Case priority
    pub enum Priority {
        Critical => "CRITICAL",
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
    }
}

/// Investigation case opened against a tender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
    pub id: Id,

    #[validate(length(min = 1, max = 64))]
    pub case_number: String,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub tender_id: Option<Id>,

    pub investigator_name: Option<String>,

    pub status: InvestigationStatus,

    pub priority: Priority,

    pub opened_date: NaiveDate,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub estimated_loss: f64,
}

impl Investigation {
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status,
            InvestigationStatus::Resolved | InvestigationStatus::Closed
        )
    }
}

/// Field names exposed to queries
pub mod attributes {
    pub const ID: &str = "id";
    pub const CASE_NUMBER: &str = "caseNumber";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const TENDER_ID: &str = "tenderId";
    pub const INVESTIGATOR_NAME: &str = "investigatorName";
    pub const STATUS: &str = "status";
    pub const PRIORITY: &str = "priority";
    pub const OPENED_DATE: &str = "openedDate";
    pub const ESTIMATED_LOSS: &str = "estimatedLoss";
}

const FIELDS: &[FieldDef] = &[
    FieldDef::new(attributes::ID, FieldKind::Integer),
    FieldDef::new(attributes::CASE_NUMBER, FieldKind::Text),
    FieldDef::new(attributes::TITLE, FieldKind::Text),
    FieldDef::new(attributes::DESCRIPTION, FieldKind::Text),
    FieldDef::new(attributes::TENDER_ID, FieldKind::Integer),
    FieldDef::new(attributes::INVESTIGATOR_NAME, FieldKind::Text),
    FieldDef::new(attributes::STATUS, FieldKind::Enum),
    FieldDef::new(attributes::PRIORITY, FieldKind::Enum),
    FieldDef::new(attributes::OPENED_DATE, FieldKind::Date),
    FieldDef::new(attributes::ESTIMATED_LOSS, FieldKind::Number),
];

impl Identifiable for Investigation {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Record for Investigation {
    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        use attributes::*;

        let value: FieldValue<'_> = match name {
            ID => self.id.into(),
            CASE_NUMBER => (&self.case_number).into(),
            TITLE => (&self.title).into(),
            DESCRIPTION => (&self.description).into(),
            TENDER_ID => self.tender_id.into(),
            INVESTIGATOR_NAME => self.investigator_name.as_deref().into(),
            STATUS => self.status.as_str().into(),
            PRIORITY => self.priority.as_str().into(),
            OPENED_DATE => self.opened_date.into(),
            ESTIMATED_LOSS => self.estimated_loss.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_investigation_fields() {
        let case = Investigation {
            id: 1,
            case_number: "INV-2024-001".into(),
            title: "Road tender price inflation".into(),
            description: "Bill of quantities exceeds market rates".into(),
            tender_id: None,
            investigator_name: Some("J. Otieno".into()),
            status: InvestigationStatus::InProgress,
            priority: Priority::High,
            opened_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            estimated_loss: 1_200_000.0,
        };

        assert!(case.is_active());
        assert_eq!(case.field("tenderId"), Some(FieldValue::Null));
        assert_eq!(case.field("priority"), Some(FieldValue::from("HIGH")));
        assert_eq!(
            case.field("openedDate"),
            NaiveDate::from_ymd_opt(2024, 5, 2).map(FieldValue::Date)
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            InvestigationStatus::from_str("In Progress"),
            Some(InvestigationStatus::InProgress)
        );
        assert_eq!(InvestigationStatus::from_str("archived"), None);
    }
}
