//! Supplier model

use serde::{Deserialize, Serialize};
use tw_core::traits::{Id, Identifiable, Record};
use tw_core::types::{FieldDef, FieldKind, FieldValue};
use validator::Validate;

use crate::labels::label_enum;
use crate::risk::RiskLevel;

label_enum! {
    /// Outcome of supplier verification
    pub enum VerificationStatus {
        Verified => "VERIFIED",
        Pending => "PENDING",
        Rejected => "REJECTED",
        Flagged => "FLAGGED",
    }
}

/// Registered supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Id,

    #[validate(length(min = 1, max = 64))]
    pub registration_number: String,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub county: String,

    pub verification_status: VerificationStatus,

    /// Risk score (0-100)
    #[validate(range(max = 100))]
    pub risk_score: u32,

    /// Number of tenders delivered
    #[serde(default)]
    pub completed_tenders: u32,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub total_contract_value: f64,

    #[serde(default)]
    pub flagged_contracts: u32,
}

impl Supplier {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

/// Field names exposed to queries
pub mod attributes {
    pub const ID: &str = "id";
    pub const REGISTRATION_NUMBER: &str = "registrationNumber";
    pub const NAME: &str = "name";
    pub const COUNTY: &str = "county";
    pub const VERIFICATION_STATUS: &str = "verificationStatus";
    pub const RISK_SCORE: &str = "riskScore";
    pub const RISK_LEVEL: &str = "riskLevel";
    pub const COMPLETED_TENDERS: &str = "completedTenders";
    pub const TOTAL_CONTRACT_VALUE: &str = "totalContractValue";
    pub const FLAGGED_CONTRACTS: &str = "flaggedContracts";
}

const FIELDS: &[FieldDef] = &[
    FieldDef::new(attributes::ID, FieldKind::Integer),
    FieldDef::new(attributes::REGISTRATION_NUMBER, FieldKind::Text),
    FieldDef::new(attributes::NAME, FieldKind::Text),
    FieldDef::new(attributes::COUNTY, FieldKind::Text),
    FieldDef::new(attributes::VERIFICATION_STATUS, FieldKind::Enum),
    FieldDef::new(attributes::RISK_SCORE, FieldKind::Integer),
    FieldDef::new(attributes::RISK_LEVEL, FieldKind::Enum),
    FieldDef::new(attributes::COMPLETED_TENDERS, FieldKind::Integer),
    FieldDef::new(attributes::TOTAL_CONTRACT_VALUE, FieldKind::Number),
    FieldDef::new(attributes::FLAGGED_CONTRACTS, FieldKind::Integer),
];

impl Identifiable for Supplier {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Record for Supplier {
    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        use attributes::*;

        let value: FieldValue<'_> = match name {
            ID => self.id.into(),
            REGISTRATION_NUMBER => (&self.registration_number).into(),
            NAME => (&self.name).into(),
            COUNTY => (&self.county).into(),
            VERIFICATION_STATUS => self.verification_status.as_str().into(),
            RISK_SCORE => self.risk_score.into(),
            RISK_LEVEL => self.risk_level().as_str().into(),
            COMPLETED_TENDERS => self.completed_tenders.into(),
            TOTAL_CONTRACT_VALUE => self.total_contract_value.into(),
            FLAGGED_CONTRACTS => self.flagged_contracts.into(),
            _ => return None,
        };
        Some(value)
    }
}
