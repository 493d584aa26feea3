use std::collections::BTreeMap;

use crate::config::variants::FuelVariant;
use crate::models::impact_record::{ImpactRecord, ImpactTable};
use crate::models::life_cycle_stage::LifeCycleStage;

/// Sum that skips missing values; an empty selection sums to zero.
pub fn sum_present<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    // Float `sum` starts from -0.0
    values.into_iter().flatten().fold(0.0, |acc, v| acc + v)
}

pub fn variant_total(table: &ImpactTable, variant: &FuelVariant, column: usize) -> f64 {
    sum_present(table.variant_rows(variant).map(|record| record.value(column)))
}

/// Totals of every impact column for one variant, in column order.
pub fn variant_column_totals(table: &ImpactTable, variant: &FuelVariant) -> Vec<f64> {
    let mut totals = vec![0.0; table.categories().len()];
    for record in table.variant_rows(variant) {
        for (total, value) in totals.iter_mut().zip(record.values.iter()) {
            if let Some(v) = value {
                *total += v;
            }
        }
    }
    totals
}

/// Per-key sums over the rows handed in; keys with only missing values sum to zero.
pub fn group_sums<'a, K, I, F>(records: I, column: usize, key: F) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = &'a ImpactRecord>,
    F: Fn(&ImpactRecord) -> K,
{
    let mut sums = BTreeMap::new();
    for record in records {
        let entry = sums.entry(key(record)).or_insert(0.0);
        if let Some(v) = record.value(column) {
            *entry += v;
        }
    }
    sums
}

pub fn stage_sums<'a, I>(records: I, column: usize) -> BTreeMap<LifeCycleStage, f64>
where
    I: IntoIterator<Item = &'a ImpactRecord>,
{
    group_sums(records, column, |record| record.stage)
}

/// Share of each value in the total, in percent; all zero when the total is not positive.
pub fn percent_shares(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    values
        .iter()
        .map(|v| if total > 0.0 { v / total * 100.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::variants::find_variant;
    use crate::models::impact_record::fixtures::record;

    fn table() -> ImpactTable {
        ImpactTable::new(
            vec!["GWP".to_string(), "Land".to_string()],
            vec![
                record("STL", 0, "1. Plant", "steel", vec![Some(1.0), Some(10.0)]),
                record("STL", 1, "2. Beet", "beet", vec![Some(2.0), None]),
                record("STL", 2, "2. Beet", "beet", vec![Some(4.0), Some(1.0)]),
                record("PTL", 1, "4. Synthesis", "electrolysis", vec![Some(8.0), Some(3.0)]),
            ],
        )
    }

    #[test]
    fn test_variant_total_skips_missing() {
        let table = table();
        let stl1 = find_variant("STL1").unwrap();
        assert_eq!(variant_total(&table, stl1, 0), 3.0);
        assert_eq!(variant_total(&table, stl1, 1), 10.0);
        let stl3 = find_variant("STL3").unwrap();
        assert_eq!(variant_total(&table, stl3, 0), 1.0);
        let hefa1 = find_variant("HEFA1").unwrap();
        assert_eq!(variant_total(&table, hefa1, 0), 0.0);
    }

    #[test]
    fn test_empty_selection_sums_to_positive_zero() {
        let total = sum_present(Vec::new());
        assert_eq!(total, 0.0);
        assert!(!total.is_sign_negative());
        assert!(!sum_present(vec![None, None]).is_sign_negative());

        let table = table();
        let btl = find_variant("BTL").unwrap();
        assert!(!variant_total(&table, btl, 0).is_sign_negative());
    }

    #[test]
    fn test_column_totals() {
        let table = table();
        let stl2 = find_variant("STL2").unwrap();
        assert_eq!(variant_column_totals(&table, stl2), vec![5.0, 11.0]);
    }

    #[test]
    fn test_stage_sums_keep_all_missing_groups() {
        let table = table();
        let stl1 = find_variant("STL1").unwrap();
        let sums = stage_sums(table.variant_rows(stl1), 1);
        assert_eq!(sums.get(&LifeCycleStage::Construction), Some(&10.0));
        assert_eq!(sums.get(&LifeCycleStage::RawMaterial), Some(&0.0));
        assert_eq!(sums.len(), 2);
    }

    #[test]
    fn test_percent_shares_sum_to_hundred() {
        let shares = percent_shares(&[1.0, 3.0, 4.0]);
        assert_eq!(shares, vec![12.5, 37.5, 50.0]);
        assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert_eq!(percent_shares(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(percent_shares(&[-2.0, 1.0]), vec![0.0, 0.0]);
    }
}
