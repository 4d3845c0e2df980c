//! Tender model
//!
//! A published procurement tender together with the corruption flags raised
//! against it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tw_core::traits::{Id, Identifiable, Record};
use tw_core::types::{FieldDef, FieldKind, FieldValue};
use validator::Validate;

use crate::labels::label_enum;
use crate::risk::{RiskLevel, Severity};

label_enum! {
    /// Tender lifecycle status
    pub enum TenderStatus {
        Published => "PUBLISHED",
        Awarded => "AWARDED",
        Cancelled => "CANCELLED",
        Flagged => "FLAGGED",
        UnderInvestigation => "UNDER_INVESTIGATION",
        Completed => "COMPLETED",
    }
}

label_enum! {
    /// Kind of irregularity a corruption flag reports
    pub enum FlagType {
        PriceInflation => "PRICE_INFLATION",
        GhostSupplier => "GHOST_SUPPLIER",
        SpecificationRestrictive => "SPECIFICATION_RESTRICTIVE",
        NetworkConflict => "NETWORK_CONFLICT",
        ShortTimeline => "SHORT_TIMELINE",
        TenderSplitting => "TENDER_SPLITTING",
        ContractVariation => "CONTRACT_VARIATION",
    }
}

/// A single corruption indicator attached to a tender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CorruptionFlag {
    #[serde(rename = "type")]
    pub flag_type: FlagType,

    pub severity: Severity,

    #[serde(default)]
    pub description: String,

    /// Indicator score (0-100)
    #[validate(range(max = 100))]
    pub score: u32,
}

/// Tender entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: Id,

    /// Reference number, e.g. `MOH/T/2024/0012`
    #[validate(length(min = 1, max = 64))]
    pub tender_number: String,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Budgeted amount
    #[validate(range(min = 0.0))]
    pub amount: f64,

    pub procuring_entity: String,

    pub county: String,

    pub category: String,

    pub submission_deadline: Option<NaiveDate>,

    pub award_date: Option<NaiveDate>,

    pub awarded_supplier_name: Option<String>,

    pub status: TenderStatus,

    /// Risk score (0-100)
    #[validate(range(max = 100))]
    pub risk_score: u32,

    #[serde(default)]
    pub is_flagged: bool,

    #[serde(default)]
    #[validate]
    pub corruption_flags: Vec<CorruptionFlag>,
}

impl Tender {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    /// Highest severity among the attached flags
    pub fn worst_flag(&self) -> Option<Severity> {
        self.corruption_flags
            .iter()
            .map(|flag| flag.severity)
            .max_by_key(|severity| Severity::ALL.iter().position(|s| s == severity))
    }
}

/// Field names exposed to queries
pub mod attributes {
    pub const ID: &str = "id";
    pub const TENDER_NUMBER: &str = "tenderNumber";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const AMOUNT: &str = "amount";
    pub const PROCURING_ENTITY: &str = "procuringEntity";
    pub const COUNTY: &str = "county";
    pub const CATEGORY: &str = "category";
    pub const SUBMISSION_DEADLINE: &str = "submissionDeadline";
    pub const AWARD_DATE: &str = "awardDate";
    pub const AWARDED_SUPPLIER_NAME: &str = "awardedSupplierName";
    pub const STATUS: &str = "status";
    pub const RISK_SCORE: &str = "riskScore";
    pub const RISK_LEVEL: &str = "riskLevel";
    pub const IS_FLAGGED: &str = "isFlagged";
    pub const FLAG_COUNT: &str = "flagCount";
}

const FIELDS: &[FieldDef] = &[
    FieldDef::new(attributes::ID, FieldKind::Integer),
    FieldDef::new(attributes::TENDER_NUMBER, FieldKind::Text),
    FieldDef::new(attributes::TITLE, FieldKind::Text),
    FieldDef::new(attributes::DESCRIPTION, FieldKind::Text),
    FieldDef::new(attributes::AMOUNT, FieldKind::Number),
    FieldDef::new(attributes::PROCURING_ENTITY, FieldKind::Text),
    FieldDef::new(attributes::COUNTY, FieldKind::Text),
    FieldDef::new(attributes::CATEGORY, FieldKind::Text),
    FieldDef::new(attributes::SUBMISSION_DEADLINE, FieldKind::Date),
    FieldDef::new(attributes::AWARD_DATE, FieldKind::Date),
    FieldDef::new(attributes::AWARDED_SUPPLIER_NAME, FieldKind::Text),
    FieldDef::new(attributes::STATUS, FieldKind::Enum),
    FieldDef::new(attributes::RISK_SCORE, FieldKind::Integer),
    FieldDef::new(attributes::RISK_LEVEL, FieldKind::Enum),
    FieldDef::new(attributes::IS_FLAGGED, FieldKind::Bool),
    FieldDef::new(attributes::FLAG_COUNT, FieldKind::Integer),
];

impl Identifiable for Tender {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Record for Tender {
    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        use attributes::*;

        let value: FieldValue<'_> = match name {
            ID => self.id.into(),
            TENDER_NUMBER => (&self.tender_number).into(),
            TITLE => (&self.title).into(),
            DESCRIPTION => (&self.description).into(),
            AMOUNT => self.amount.into(),
            PROCURING_ENTITY => (&self.procuring_entity).into(),
            COUNTY => (&self.county).into(),
            CATEGORY => (&self.category).into(),
            SUBMISSION_DEADLINE => self.submission_deadline.into(),
            AWARD_DATE => self.award_date.into(),
            AWARDED_SUPPLIER_NAME => self.awarded_supplier_name.as_deref().into(),
            STATUS => self.status.as_str().into(),
            RISK_SCORE => self.risk_score.into(),
            RISK_LEVEL => self.risk_level().as_str().into(),
            IS_FLAGGED => self.is_flagged.into(),
            FLAG_COUNT => (self.corruption_flags.len() as i64).into(),
            _ => return None,
        };
        Some(value)
    }
}
