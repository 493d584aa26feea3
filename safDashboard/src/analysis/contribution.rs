use serde::Serialize;

use crate::analysis::aggregation::{percent_shares, stage_sums};
use crate::config::variants::FUEL_VARIANTS;
use crate::models::impact_record::ImpactTable;
use crate::models::life_cycle_stage::LifeCycleStage;
use crate::utils::logging::{self, AnalysisType, OperationCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionRow {
    pub variant: &'static str,
    pub stage: LifeCycleStage,
    pub percent: f64,
}

/// Share of each life-cycle stage in every variant's total for one impact column.
///
/// Variants without rows are left out. Stages appear only when the variant has
/// rows in them.
pub fn build_contributions(table: &ImpactTable, column: usize) -> Vec<ContributionRow> {
    let _timing = logging::start_timing("build_contributions",
        OperationCategory::Analysis { subcategory: AnalysisType::Aggregation });

    let mut rows = Vec::new();
    for variant in FUEL_VARIANTS.iter() {
        let sums = stage_sums(table.variant_rows(variant), column);
        if sums.is_empty() {
            continue;
        }

        let stages: Vec<LifeCycleStage> = sums.keys().copied().collect();
        let values: Vec<f64> = sums.values().copied().collect();
        for (stage, percent) in stages.into_iter().zip(percent_shares(&values)) {
            rows.push(ContributionRow {
                variant: variant.label,
                stage,
                percent,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::impact_record::fixtures::record;

    #[test]
    fn test_percentages_sum_to_hundred_per_variant() {
        let table = ImpactTable::new(
            vec!["GWP".to_string()],
            vec![
                record("PTL", 0, "1. Plant", "steel", vec![Some(1.0)]),
                record("PTL", 0, "4. Synthesis", "electrolysis", vec![Some(2.0)]),
                record("PTL", 1, "5. Truck", "diesel", vec![Some(1.0)]),
                record("PTL", 2, "2. Capture", "DAC", vec![Some(5.0)]),
            ],
        );
        let rows = build_contributions(&table, 0);

        // Every PTL variant has rows through scenario 0, other families have none
        let variants: std::collections::BTreeSet<_> = rows.iter().map(|r| r.variant).collect();
        assert_eq!(variants.len(), 4);

        for variant in &variants {
            let total: f64 = rows.iter().filter(|r| r.variant == *variant).map(|r| r.percent).sum();
            assert!((total - 100.0).abs() < 1e-9, "{} sums to {}", variant, total);
        }

        let ptl1: Vec<_> = rows.iter().filter(|r| r.variant == "PTL1").collect();
        assert_eq!(ptl1.len(), 3);
        assert_eq!(ptl1[0].stage, LifeCycleStage::Construction);
        assert_eq!(ptl1[0].percent, 25.0);
        assert_eq!(ptl1[2].stage, LifeCycleStage::Transportation);
    }

    #[test]
    fn test_non_positive_total_gives_zero_shares() {
        let table = ImpactTable::new(
            vec!["GWP".to_string()],
            vec![
                record("BTL", 0, "1. Plant", "steel", vec![Some(-3.0)]),
                record("BTL", 0, "2. Forest", "wood", vec![Some(1.0)]),
            ],
        );
        let rows = build_contributions(&table, 0);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.percent == 0.0));
    }
}
