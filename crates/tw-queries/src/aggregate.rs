//! Group-by roll-ups
//!
//! Derived listings (procuring entities, counties) are built by grouping
//! tenders on a key and summarising each group. The results are ordinary
//! records and can be queried with the engine like any other collection.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;
use tw_core::traits::Record;
use tw_core::types::FieldValue;
use tw_models::{CountySummary, EntitySummary, RiskDistribution, Tender};

/// Count, sum and mean for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary<K> {
    pub key: K,
    pub count: usize,
    pub sum: f64,
    pub average: f64,
}

/// Group `records` by `key_of`, summing `sum_of` and averaging `average_of`
/// within each group.
///
/// Groups come out in the order their first member appears in `records`.
/// Every group has at least one member, so averages are always defined.
pub fn group_aggregate<T, K, FK, FS, FA>(
    records: &[T],
    key_of: FK,
    sum_of: FS,
    average_of: FA,
) -> Vec<GroupSummary<K>>
where
    K: Eq + Hash + Clone,
    FK: Fn(&T) -> K,
    FS: Fn(&T) -> f64,
    FA: Fn(&T) -> f64,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, usize, f64, f64)> = Vec::new();

    for record in records {
        let key = key_of(record);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, 0, 0.0, 0.0));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.1 += 1;
        group.2 += sum_of(record);
        group.3 += average_of(record);
    }

    debug!(records = records.len(), groups = groups.len(), "grouped records");

    groups
        .into_iter()
        .map(|(key, count, sum, average_total)| GroupSummary {
            key,
            count,
            sum,
            average: average_total / count as f64,
        })
        .collect()
}

/// Largest sum first; groups with equal sums keep their order
pub fn sort_by_sum_desc<K>(groups: &mut [GroupSummary<K>]) {
    groups.sort_by(|a, b| b.sum.total_cmp(&a.sum));
}

/// One summary per procuring entity, largest total spend first.
///
/// An entity's county is the county of its first tender.
pub fn entity_summaries(tenders: &[Tender]) -> Vec<EntitySummary> {
    let mut first_county: HashMap<&str, &str> = HashMap::new();
    for tender in tenders {
        first_county
            .entry(tender.procuring_entity.as_str())
            .or_insert(tender.county.as_str());
    }

    let mut groups = group_aggregate(
        tenders,
        |t| t.procuring_entity.clone(),
        |t| t.amount,
        |t| f64::from(t.risk_score),
    );
    sort_by_sum_desc(&mut groups);

    groups
        .into_iter()
        .map(|group| EntitySummary {
            county: first_county
                .get(group.key.as_str())
                .map(|county| county.to_string())
                .unwrap_or_default(),
            name: group.key,
            tender_count: group.count,
            total_spent: group.sum,
            average_risk: group.average,
        })
        .collect()
}

/// One summary per county, largest total value first
pub fn county_summaries(tenders: &[Tender]) -> Vec<CountySummary> {
    let mut flagged: HashMap<&str, usize> = HashMap::new();
    for tender in tenders.iter().filter(|t| t.is_flagged) {
        *flagged.entry(tender.county.as_str()).or_default() += 1;
    }

    let mut groups = group_aggregate(
        tenders,
        |t| t.county.clone(),
        |t| t.amount,
        |t| f64::from(t.risk_score),
    );
    sort_by_sum_desc(&mut groups);

    groups
        .into_iter()
        .map(|group| CountySummary {
            flagged_tenders: flagged.get(group.key.as_str()).copied().unwrap_or(0),
            county: group.key,
            total_tenders: group.count,
            total_value: group.sum,
            average_risk: group.average,
        })
        .collect()
}

/// Count records per risk level, reading each record's `riskScore` field.
///
/// Records without a numeric risk score are not counted.
pub fn risk_distribution<T: Record>(records: &[T]) -> RiskDistribution {
    RiskDistribution::from_scores(records.iter().filter_map(|record| {
        match record.field("riskScore")? {
            FieldValue::Integer(score) => u32::try_from(score).ok(),
            FieldValue::Number(score) if score >= 0.0 => Some(score.round() as u32),
            _ => None,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_models::{Investigation, MockGenerator};

    fn tenders_for(entities: &[(&str, &str, f64, u32)]) -> Vec<Tender> {
        let mut tenders = MockGenerator::new(5).tenders(entities.len());
        for (tender, (entity, county, amount, risk)) in tenders.iter_mut().zip(entities) {
            tender.procuring_entity = entity.to_string();
            tender.county = county.to_string();
            tender.amount = *amount;
            tender.risk_score = *risk;
        }
        tenders
    }

    #[test]
    fn test_group_count_and_sum() {
        let tenders = tenders_for(&[
            ("MOH", "Nairobi", 100.0, 10),
            ("KPA", "Mombasa", 50.0, 20),
            ("MOH", "Kisumu", 300.0, 30),
            ("KPLC", "Nakuru", 10.0, 40),
            ("KPA", "Mombasa", 150.0, 60),
            ("MOH", "Nairobi", 100.0, 50),
            ("KPLC", "Nakuru", 20.0, 0),
            ("KPA", "Kilifi", 25.0, 90),
            ("MOH", "Nairobi", 1.0, 70),
            ("KPLC", "Nakuru", 30.0, 80),
        ]);

        let groups = group_aggregate(
            &tenders,
            |t| t.procuring_entity.clone(),
            |t| t.amount,
            |t| f64::from(t.risk_score),
        );

        assert_eq!(groups.len(), 3);
        assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), 10);

        // first-appearance order
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["MOH", "KPA", "KPLC"]);

        assert_eq!(groups[0].count, 4);
        assert_eq!(groups[0].sum, 501.0);
        assert_eq!(groups[0].average, 40.0);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        let groups = group_aggregate(&Vec::<Tender>::new(), |t| t.id, |t| t.amount, |t| t.amount);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_sort_by_sum_is_stable() {
        let mut groups = vec![
            GroupSummary { key: "a", count: 1, sum: 5.0, average: 0.0 },
            GroupSummary { key: "b", count: 1, sum: 9.0, average: 0.0 },
            GroupSummary { key: "c", count: 1, sum: 5.0, average: 0.0 },
        ];
        sort_by_sum_desc(&mut groups);
        let keys: Vec<&str> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_entity_summaries() {
        let tenders = tenders_for(&[
            ("MOH", "Nairobi", 100.0, 10),
            ("KPA", "Mombasa", 500.0, 20),
            ("MOH", "Kisumu", 300.0, 30),
        ]);

        let summaries = entity_summaries(&tenders);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "KPA");
        assert_eq!(summaries[0].total_spent, 500.0);

        let moh = &summaries[1];
        assert_eq!(moh.county, "Nairobi");
        assert_eq!(moh.tender_count, 2);
        assert_eq!(moh.total_spent, 400.0);
        assert_eq!(moh.average_risk, 20.0);
    }

    #[test]
    fn test_county_summaries() {
        let mut tenders = tenders_for(&[
            ("MOH", "Nairobi", 100.0, 10),
            ("KPA", "Mombasa", 500.0, 90),
            ("MOH", "Nairobi", 300.0, 80),
        ]);
        tenders[0].is_flagged = false;
        tenders[1].is_flagged = true;
        tenders[2].is_flagged = true;

        let summaries = county_summaries(&tenders);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].county, "Mombasa");
        assert_eq!(summaries[0].flagged_tenders, 1);

        let nairobi = &summaries[1];
        assert_eq!(nairobi.total_tenders, 2);
        assert_eq!(nairobi.flagged_tenders, 1);
        assert_eq!(nairobi.total_value, 400.0);
        assert_eq!(nairobi.average_risk, 45.0);
    }

    #[test]
    fn test_risk_distribution() {
        let tenders = tenders_for(&[
            ("A", "X", 1.0, 0),
            ("A", "X", 1.0, 25),
            ("A", "X", 1.0, 26),
            ("A", "X", 1.0, 75),
            ("A", "X", 1.0, 76),
            ("A", "X", 1.0, 100),
        ]);

        let distribution = risk_distribution(&tenders);
        assert_eq!(distribution.low, 2);
        assert_eq!(distribution.medium, 1);
        assert_eq!(distribution.high, 1);
        assert_eq!(distribution.critical, 2);
        assert_eq!(distribution.total(), 6);
    }

    #[test]
    fn test_risk_distribution_without_scores() {
        let investigations: Vec<Investigation> = MockGenerator::new(1).investigations(5);
        assert_eq!(risk_distribution(&investigations).total(), 0);
    }
}
