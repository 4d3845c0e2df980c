//! # tw-models
//!
//! Record models for Tenderwatch.
//!
//! Every record implements [`Record`] so the query engine can filter, search
//! and sort it by field name, and [`Identifiable`] so collections can be
//! checked for duplicate ids on load.

pub use tw_core::traits::{Id, Identifiable, Record};

pub(crate) mod labels;

pub mod collection;
pub mod investigation;
pub mod mock;
pub mod report;
pub mod risk;
pub mod summary;
pub mod supplier;
pub mod tender;

// Re-exports for convenience
pub use collection::{load_records, parse_records, validate_records};
pub use investigation::{Investigation, InvestigationStatus, Priority};
pub use mock::MockGenerator;
pub use report::{PublicReport, ReportStatus, ReportType};
pub use risk::{RiskDistribution, RiskLevel, Severity};
pub use summary::{CountySummary, EntitySummary};
pub use supplier::{Supplier, VerificationStatus};
pub use tender::{CorruptionFlag, FlagType, Tender, TenderStatus};
