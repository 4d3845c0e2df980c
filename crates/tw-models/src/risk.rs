//! Risk levels and severities
//!
//! Risk scores are data supplied with each record (0–100). This module only
//! buckets them for display and filtering; it never computes a score.

use serde::Serialize;

use crate::labels::label_enum;

/// Highest valid risk score
pub const MAX_RISK_SCORE: u32 = 100;

label_enum! {
    /// Risk bucket for a 0–100 risk score
    pub enum RiskLevel {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

impl RiskLevel {
    /// Bucket a score. Scores above 100 are treated as critical.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=25 => Self::Low,
            26..=50 => Self::Medium,
            51..=75 => Self::High,
            _ => Self::Critical,
        }
    }

    /// Inclusive score bounds of this bucket
    pub fn range(&self) -> (u32, u32) {
        match self {
            Self::Low => (0, 25),
            Self::Medium => (26, 50),
            Self::High => (51, 75),
            Self::Critical => (76, MAX_RISK_SCORE),
        }
    }
}

label_enum! {
    /// Severity of a corruption flag or a public report
    pub enum Severity {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

/// Count of records per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskDistribution {
    pub fn from_scores(scores: impl IntoIterator<Item = u32>) -> Self {
        let mut distribution = Self::default();
        for score in scores {
            distribution.record(score);
        }
        distribution
    }

    pub fn record(&mut self, score: u32) {
        match RiskLevel::from_score(score) {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(25), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(26), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(51), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(76), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn test_ranges_cover_every_score() {
        for score in 0..=MAX_RISK_SCORE {
            let level = RiskLevel::from_score(score);
            let (min, max) = level.range();
            assert!((min..=max).contains(&score), "{} outside {:?}", score, level);
        }
    }

    #[test]
    fn test_distribution() {
        let distribution = RiskDistribution::from_scores([10, 30, 60, 80, 90]);
        assert_eq!(distribution.low, 1);
        assert_eq!(distribution.medium, 1);
        assert_eq!(distribution.high, 1);
        assert_eq!(distribution.count(RiskLevel::Critical), 2);
        assert_eq!(distribution.total(), 5);
    }
}
