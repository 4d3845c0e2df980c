//! Deterministic mock data
//!
//! Stand-in collections for development and tests. The same seed always
//! yields the same records, and every record satisfies the model invariants
//! (unique ids, risk scores within 0–100).

use chrono::{Duration, NaiveDate};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tw_core::traits::Id;

use crate::investigation::{Investigation, InvestigationStatus, Priority};
use crate::report::{PublicReport, ReportStatus, ReportType};
use crate::risk::{RiskLevel, Severity, MAX_RISK_SCORE};
use crate::supplier::{Supplier, VerificationStatus};
use crate::tender::{CorruptionFlag, FlagType, Tender, TenderStatus};

pub const COUNTIES: &[&str] = &[
    "Baringo", "Bomet", "Bungoma", "Busia", "Elgeyo-Marakwet", "Embu", "Garissa",
    "Homa Bay", "Isiolo", "Kajiado", "Kakamega", "Kericho", "Kiambu", "Kilifi",
    "Kirinyaga", "Kisii", "Kisumu", "Kitui", "Kwale", "Laikipia", "Lamu", "Machakos",
    "Makueni", "Mandera", "Marsabit", "Meru", "Migori", "Mombasa", "Murang'a",
    "Nairobi", "Nakuru", "Nandi", "Narok", "Nyamira", "Nyandarua", "Nyeri", "Samburu",
    "Siaya", "Taita-Taveta", "Tana River", "Tharaka-Nithi", "Trans Nzoia", "Turkana",
    "Uasin Gishu", "Vihiga", "Wajir", "West Pokot",
];

pub const CATEGORIES: &[&str] = &[
    "Construction & Infrastructure",
    "Medical Equipment & Supplies",
    "Office Equipment & Furniture",
    "Consultancy Services",
    "ICT & Technology",
    "Transport & Vehicles",
    "Security Services",
    "Stationery & Printing",
    "Legal Services",
    "Catering Services",
    "Maintenance & Repairs",
    "Other",
];

pub const PROCURING_ENTITIES: &[(&str, &str)] = &[
    ("Ministry of Health", "MOH"),
    ("Ministry of Education", "MOE"),
    ("Kenya Rural Roads Authority", "KERRA"),
    ("Kenya Power", "KPLC"),
    ("Nairobi City County", "NCC"),
    ("Kenya Ports Authority", "KPA"),
    ("National Irrigation Authority", "NIA"),
    ("Ministry of Interior", "MOI"),
];

const WORKS: &[&str] = &[
    "Road Construction Project",
    "Supply of Medical Equipment",
    "ICT Equipment Upgrade",
    "Borehole Drilling",
    "Office Furniture Supply",
    "Classroom Construction",
    "Security Services Contract",
    "Hospital Wing Renovation",
    "Fleet Vehicle Procurement",
    "Audit Consultancy",
];

/// Seeded generator for mock collections
pub struct MockGenerator {
    rng: StdRng,
}

impl MockGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tenders(&mut self, count: usize) -> Vec<Tender> {
        (1..=count as Id).map(|id| self.tender(id)).collect()
    }

    pub fn suppliers(&mut self, count: usize) -> Vec<Supplier> {
        (1..=count as Id).map(|id| self.supplier(id)).collect()
    }

    pub fn investigations(&mut self, count: usize) -> Vec<Investigation> {
        (1..=count as Id).map(|id| self.investigation(id)).collect()
    }

    pub fn reports(&mut self, count: usize) -> Vec<PublicReport> {
        (1..=count as Id).map(|id| self.report(id)).collect()
    }

    fn tender(&mut self, id: Id) -> Tender {
        let (entity, code) = *self.pick(PROCURING_ENTITIES);
        let county = self.pick(COUNTIES).to_string();
        let status = *self.pick(TenderStatus::ALL);
        let risk_score = self.rng.gen_range(0..=MAX_RISK_SCORE);
        let corruption_flags = self.flags_for(risk_score);
        let deadline = self.date_2024();
        let awarded = matches!(status, TenderStatus::Awarded | TenderStatus::Completed);

        Tender {
            id,
            tender_number: format!("{}/T/2024/{:04}", code, id),
            title: format!("{} - {}", self.pick(WORKS), county),
            description: Sentence(8..16).fake_with_rng(&mut self.rng),
            amount: self.rng.gen_range(500_000.0..250_000_000.0_f64).round(),
            procuring_entity: entity.to_string(),
            county,
            category: self.pick(CATEGORIES).to_string(),
            submission_deadline: Some(deadline),
            award_date: awarded.then(|| deadline + Duration::days(30)),
            awarded_supplier_name: if awarded {
                Some(CompanyName().fake_with_rng(&mut self.rng))
            } else {
                None
            },
            status,
            risk_score,
            is_flagged: matches!(
                status,
                TenderStatus::Flagged | TenderStatus::UnderInvestigation
            ) || !corruption_flags.is_empty(),
            corruption_flags,
        }
    }

    fn flags_for(&mut self, risk_score: u32) -> Vec<CorruptionFlag> {
        let level = RiskLevel::from_score(risk_score);
        let count = match level {
            RiskLevel::Low | RiskLevel::Medium => 0,
            RiskLevel::High => 1,
            RiskLevel::Critical => self.rng.gen_range(2..=3),
        };
        (0..count)
            .map(|_| CorruptionFlag {
                flag_type: *self.pick(FlagType::ALL),
                severity: match level {
                    RiskLevel::Critical => Severity::Critical,
                    _ => Severity::High,
                },
                description: Sentence(5..10).fake_with_rng(&mut self.rng),
                score: self.rng.gen_range(risk_score / 2..=risk_score),
            })
            .collect()
    }

    fn supplier(&mut self, id: Id) -> Supplier {
        let completed_tenders = self.rng.gen_range(0..60);
        Supplier {
            id,
            registration_number: format!("PVT-{:06}", id * 7919 % 1_000_000),
            name: CompanyName().fake_with_rng(&mut self.rng),
            county: self.pick(COUNTIES).to_string(),
            verification_status: *self.pick(VerificationStatus::ALL),
            risk_score: self.rng.gen_range(0..=MAX_RISK_SCORE),
            completed_tenders,
            total_contract_value: self.rng.gen_range(0.0..500_000_000.0_f64).round(),
            flagged_contracts: self.rng.gen_range(0..=completed_tenders / 4),
        }
    }

    fn investigation(&mut self, id: Id) -> Investigation {
        let work = self.pick(WORKS).to_lowercase();
        Investigation {
            id,
            case_number: format!("INV-2024-{:03}", id),
            title: format!("Irregularities in {}", work),
            description: Sentence(10..20).fake_with_rng(&mut self.rng),
            tender_id: Some(self.rng.gen_range(1..=500)),
            investigator_name: Some(Name().fake_with_rng(&mut self.rng)),
            status: *self.pick(InvestigationStatus::ALL),
            priority: *self.pick(Priority::ALL),
            opened_date: self.date_2024(),
            estimated_loss: self.rng.gen_range(0.0..50_000_000.0_f64).round(),
        }
    }

    fn report(&mut self, id: Id) -> PublicReport {
        let anonymous = self.rng.gen_bool(0.6);
        PublicReport {
            tracking_id: format!("WB-{:04}{:04X}", id, self.rng.gen::<u16>()),
            report_type: *self.pick(ReportType::ALL),
            title: Some(Sentence(3..6).fake_with_rng(&mut self.rng)),
            description: Sentence(12..24).fake_with_rng(&mut self.rng),
            county: self.pick(COUNTIES).to_string(),
            entity: Some(self.pick(PROCURING_ENTITIES).0.to_string()),
            submitted_date: self.date_2024(),
            status: *self.pick(ReportStatus::ALL),
            severity: *self.pick(Severity::ALL),
            related_tender_id: None,
            anonymous,
        }
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    fn date_2024(&mut self) -> NaiveDate {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN);
        start + Duration::days(self.rng.gen_range(0..366))
    }
}
