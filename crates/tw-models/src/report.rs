//! Public (whistleblower) report model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tw_core::traits::{Id, Identifiable, Record};
use tw_core::types::{FieldDef, FieldKind, FieldValue};
use validator::Validate;

use crate::labels::label_enum;
use crate::risk::Severity;

label_enum! {
    /// Review state of a public report
    pub enum ReportStatus {
        Pending => "PENDING",
        UnderReview => "UNDER_REVIEW",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        ConvertedToInvestigation => "CONVERTED_TO_INVESTIGATION",
    }
}

label_enum! {
    /// What the reporter alleges
    pub enum ReportType {
        Fraud => "FRAUD",
        Corruption => "CORRUPTION",
        Irregularity => "IRREGULARITY",
        Bribery => "BRIBERY",
        Embezzlement => "EMBEZZLEMENT",
        ConflictOfInterest => "CONFLICT_OF_INTEREST",
    }
}

/// A report submitted through the public whistleblower form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublicReport {
    /// Tracking identifier handed to the reporter
    #[validate(length(min = 1, max = 64))]
    pub tracking_id: String,

    pub report_type: ReportType,

    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: String,

    pub county: String,

    /// Procuring entity named in the report
    pub entity: Option<String>,

    pub submitted_date: NaiveDate,

    pub status: ReportStatus,

    pub severity: Severity,

    pub related_tender_id: Option<Id>,

    #[serde(default)]
    pub anonymous: bool,
}

/// Field names exposed to queries
pub mod attributes {
    pub const TRACKING_ID: &str = "trackingId";
    pub const REPORT_TYPE: &str = "reportType";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const COUNTY: &str = "county";
    pub const ENTITY: &str = "entity";
    pub const SUBMITTED_DATE: &str = "submittedDate";
    pub const STATUS: &str = "status";
    pub const SEVERITY: &str = "severity";
    pub const RELATED_TENDER_ID: &str = "relatedTenderId";
    pub const ANONYMOUS: &str = "anonymous";
}

const FIELDS: &[FieldDef] = &[
    FieldDef::new(attributes::TRACKING_ID, FieldKind::Text),
    FieldDef::new(attributes::REPORT_TYPE, FieldKind::Enum),
    FieldDef::new(attributes::TITLE, FieldKind::Text),
    FieldDef::new(attributes::DESCRIPTION, FieldKind::Text),
    FieldDef::new(attributes::COUNTY, FieldKind::Text),
    FieldDef::new(attributes::ENTITY, FieldKind::Text),
    FieldDef::new(attributes::SUBMITTED_DATE, FieldKind::Date),
    FieldDef::new(attributes::STATUS, FieldKind::Enum),
    FieldDef::new(attributes::SEVERITY, FieldKind::Enum),
    FieldDef::new(attributes::RELATED_TENDER_ID, FieldKind::Integer),
    FieldDef::new(attributes::ANONYMOUS, FieldKind::Bool),
];

impl Identifiable for PublicReport {
    fn record_id(&self) -> String {
        self.tracking_id.clone()
    }
}

impl Record for PublicReport {
    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        use attributes::*;

        let value: FieldValue<'_> = match name {
            TRACKING_ID => (&self.tracking_id).into(),
            REPORT_TYPE => self.report_type.as_str().into(),
            TITLE => self.title.as_deref().into(),
            DESCRIPTION => (&self.description).into(),
            COUNTY => (&self.county).into(),
            ENTITY => self.entity.as_deref().into(),
            SUBMITTED_DATE => self.submitted_date.into(),
            STATUS => self.status.as_str().into(),
            SEVERITY => self.severity.as_str().into(),
            RELATED_TENDER_ID => self.related_tender_id.into(),
            ANONYMOUS => self.anonymous.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_json() {
        let json = r#"{
            "trackingId": "WB-00A1B2C3",
            "reportType": "CONFLICT_OF_INTEREST",
            "description": "Director of winning bidder sits on evaluation committee",
            "county": "Nakuru",
            "submittedDate": "2024-06-11",
            "status": "UNDER_REVIEW",
            "severity": "HIGH",
            "anonymous": true
        }"#;
        let report: PublicReport = serde_json::from_str(json).unwrap();

        assert_eq!(report.record_id(), "WB-00A1B2C3");
        assert_eq!(report.status, ReportStatus::UnderReview);
        assert_eq!(report.field("title"), Some(FieldValue::Null));
        assert_eq!(report.field("reportType"), Some(FieldValue::from("CONFLICT_OF_INTEREST")));
        assert_eq!(report.field("anonymous"), Some(FieldValue::Bool(true)));
        assert!(report.validate().is_ok());
    }

    #[test]
    fn test_empty_description_invalid() {
        let report = PublicReport {
            tracking_id: "WB-1".into(),
            report_type: ReportType::Fraud,
            title: None,
            description: String::new(),
            county: "Kisumu".into(),
            entity: None,
            submitted_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: ReportStatus::Pending,
            severity: Severity::Low,
            related_tender_id: None,
            anonymous: false,
        };
        assert!(report.validate().is_err());
    }
}
