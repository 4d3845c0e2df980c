//! Derived roll-up records
//!
//! These are never loaded from a data source. They are built from tenders by
//! group-by aggregation and then queried like any other record.

use serde::{Deserialize, Serialize};
use tw_core::traits::{Identifiable, Record};
use tw_core::types::{FieldDef, FieldKind, FieldValue};

use crate::risk::RiskLevel;

/// One procuring entity with its aggregate spend and average risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    pub name: String,
    /// County of the entity's first tender
    pub county: String,
    pub tender_count: usize,
    pub total_spent: f64,
    pub average_risk: f64,
}

impl EntitySummary {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.average_risk.round() as u32)
    }
}

/// Per-county tender totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountySummary {
    pub county: String,
    pub total_tenders: usize,
    pub flagged_tenders: usize,
    pub total_value: f64,
    pub average_risk: f64,
}

impl CountySummary {
    /// Share of tenders flagged, 0.0–1.0
    pub fn flagged_rate(&self) -> f64 {
        if self.total_tenders == 0 {
            0.0
        } else {
            self.flagged_tenders as f64 / self.total_tenders as f64
        }
    }
}

pub mod attributes {
    pub const NAME: &str = "name";
    pub const COUNTY: &str = "county";
    pub const TENDER_COUNT: &str = "tenderCount";
    pub const TOTAL_SPENT: &str = "totalSpent";
    pub const AVERAGE_RISK: &str = "averageRisk";
    pub const TOTAL_TENDERS: &str = "totalTenders";
    pub const FLAGGED_TENDERS: &str = "flaggedTenders";
    pub const TOTAL_VALUE: &str = "totalValue";
}

const ENTITY_FIELDS: &[FieldDef] = &[
    FieldDef::new(attributes::NAME, FieldKind::Text),
    FieldDef::new(attributes::COUNTY, FieldKind::Text),
    FieldDef::new(attributes::TENDER_COUNT, FieldKind::Integer),
    FieldDef::new(attributes::TOTAL_SPENT, FieldKind::Number),
    FieldDef::new(attributes::AVERAGE_RISK, FieldKind::Number),
];

const COUNTY_FIELDS: &[FieldDef] = &[
    FieldDef::new(attributes::COUNTY, FieldKind::Text),
    FieldDef::new(attributes::TOTAL_TENDERS, FieldKind::Integer),
    FieldDef::new(attributes::FLAGGED_TENDERS, FieldKind::Integer),
    FieldDef::new(attributes::TOTAL_VALUE, FieldKind::Number),
    FieldDef::new(attributes::AVERAGE_RISK, FieldKind::Number),
];

impl Identifiable for EntitySummary {
    fn record_id(&self) -> String {
        self.name.clone()
    }
}

impl Record for EntitySummary {
    fn fields() -> &'static [FieldDef] {
        ENTITY_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        use attributes::*;

        let value: FieldValue<'_> = match name {
            NAME => (&self.name).into(),
            COUNTY => (&self.county).into(),
            TENDER_COUNT => (self.tender_count as i64).into(),
            TOTAL_SPENT => self.total_spent.into(),
            AVERAGE_RISK => self.average_risk.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Identifiable for CountySummary {
    fn record_id(&self) -> String {
        self.county.clone()
    }
}

impl Record for CountySummary {
    fn fields() -> &'static [FieldDef] {
        COUNTY_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        use attributes::*;

        let value: FieldValue<'_> = match name {
            COUNTY => (&self.county).into(),
            TOTAL_TENDERS => (self.total_tenders as i64).into(),
            FLAGGED_TENDERS => (self.flagged_tenders as i64).into(),
            TOTAL_VALUE => self.total_value.into(),
            AVERAGE_RISK => self.average_risk.into(),
            _ => return None,
        };
        Some(value)
    }
}
