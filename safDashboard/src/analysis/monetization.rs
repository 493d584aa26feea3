use serde::Serialize;
use tracing::{debug, warn};

use crate::config::constants::CORRECTED_MARK;
use crate::config::monetization_factors::{
    column_override, MonetizationFactor, MonetizationTier, CLIMATE_CHANGE_CATEGORY, MONETIZATION_FACTORS,
};
use crate::config::variants::{FuelVariant, FUEL_VARIANTS};
use crate::data::column_matcher::{best_match, strip_unit};
use crate::models::fuel::FuelFamily;
use crate::models::impact_record::ImpactTable;
use crate::utils::logging::{self, AnalysisType, OperationCategory};

/// A monetization category tied to the sheet column it converts.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedCategory {
    pub factor: &'static MonetizationFactor,
    pub column: String,
    /// `None` when an override names a column the sheet does not have.
    pub column_index: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    pub mapped: Vec<MappedCategory>,
    pub unmatched: Vec<&'static str>,
}

impl ColumnMapping {
    pub fn column_for(&self, category: &str) -> Option<usize> {
        self.mapped
            .iter()
            .find(|m| m.factor.category == category)
            .and_then(|m| m.column_index)
    }
}

/// Maps every monetization category to a sheet column by override or fuzzy match.
pub fn map_columns(table: &ImpactTable) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();

    for factor in MONETIZATION_FACTORS.iter() {
        let column = match column_override(factor.category) {
            Some(column) => Some(column.to_string()),
            None => best_match(factor.category, table.categories()).map(str::to_string),
        };

        match column {
            Some(column) => {
                let column_index = table.column_index(&column);
                if column_index.is_none() {
                    warn!(category = factor.category, column = %column, "override column missing from sheet");
                } else {
                    debug!(category = factor.category, column = %column, "mapped monetization category");
                }
                mapping.mapped.push(MappedCategory { factor, column, column_index });
            }
            None => {
                warn!(category = factor.category, "no sheet column close enough, category ignored");
                mapping.unmatched.push(factor.category);
            }
        }
    }

    mapping
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonetizationOptions {
    pub tier: MonetizationTier,
    pub apply_co2_correction: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonetizedRow {
    pub variant: &'static str,
    pub family: FuelFamily,
    pub total_cost: f64,
    /// Corrected STL/PTL results are not reported as a cost.
    pub flagged: bool,
}

/// Rounds to two decimals the way the report has always printed costs:
/// ties on the exact binary value go to the even cent.
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    if scaled - floor != 0.5 {
        return scaled.round() / 100.0;
    }

    // `value * 8` is exact, so an odd integer there means an exact half cent
    let eighths = value * 8.0;
    let cents = if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        if floor % 2.0 == 0.0 { floor } else { floor + 1.0 }
    } else if value.mul_add(100.0, -scaled) < 0.0 {
        // Scaling rounded up onto the half
        floor
    } else {
        floor + 1.0
    };
    cents / 100.0
}

impl MonetizedRow {
    pub fn rounded_cost(&self) -> f64 {
        round_to_cents(self.total_cost)
    }

    pub fn cost_label(&self) -> String {
        if self.flagged {
            CORRECTED_MARK.to_string()
        } else {
            format!("€{:.2}", self.rounded_cost())
        }
    }

    pub fn csv_value(&self) -> String {
        if self.flagged {
            CORRECTED_MARK.to_string()
        } else {
            // Shortest form that reads back to the same value: 0.4, 1.25, 0.0
            format!("{:?}", self.rounded_cost())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCost {
    pub variant: &'static str,
    pub family: FuelFamily,
    pub category: &'static str,
    pub cost: f64,
    pub flagged: bool,
}

impl CategoryCost {
    pub fn label(&self) -> String {
        if self.flagged {
            format!("{}{}", self.variant, CORRECTED_MARK)
        } else {
            self.variant.to_string()
        }
    }

    pub fn clean_category(&self) -> &'static str {
        strip_unit(self.category)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonetizationResult {
    pub rows: Vec<MonetizedRow>,
    pub breakdown: Vec<CategoryCost>,
}

fn is_flagged(variant: &FuelVariant, options: &MonetizationOptions) -> bool {
    options.apply_co2_correction && variant.family.co2_correction().is_some()
}

/// Column sums for one variant, with the per-row CO₂ correction applied when enabled.
fn corrected_column_sums(
    table: &ImpactTable,
    variant: &FuelVariant,
    climate_column: Option<usize>,
    options: &MonetizationOptions,
) -> Vec<f64> {
    let correction = if options.apply_co2_correction {
        variant.family.co2_correction()
    } else {
        None
    };

    let mut sums = vec![0.0; table.categories().len()];
    for record in table.variant_rows(variant) {
        for (index, value) in record.values.iter().enumerate() {
            if let Some(v) = value {
                let adjusted = match (correction, climate_column) {
                    (Some(delta), Some(climate)) if climate == index => v - delta,
                    _ => *v,
                };
                sums[index] += adjusted;
            }
        }
    }
    sums
}

/// Σ(impact × factor) per variant and per category.
pub fn monetize(table: &ImpactTable, mapping: &ColumnMapping, options: &MonetizationOptions) -> MonetizationResult {
    let _timing = logging::start_timing("monetize",
        OperationCategory::Analysis { subcategory: AnalysisType::Monetization });

    let climate_column = mapping.column_for(CLIMATE_CHANGE_CATEGORY);
    let mut result = MonetizationResult::default();

    for variant in FUEL_VARIANTS.iter() {
        let sums = corrected_column_sums(table, variant, climate_column, options);
        let flagged = is_flagged(variant, options);
        let mut total_cost = 0.0;

        for mapped in &mapping.mapped {
            let Some(index) = mapped.column_index else {
                continue;
            };
            let cost = sums[index] * mapped.factor.value(options.tier);
            total_cost += cost;
            result.breakdown.push(CategoryCost {
                variant: variant.label,
                family: variant.family,
                category: mapped.factor.category,
                cost,
                flagged,
            });
        }

        result.rows.push(MonetizedRow {
            variant: variant.label,
            family: variant.family,
            total_cost,
            flagged,
        });
    }

    result
}

/// (category, factor, colour) for the chosen tier, in factor table order.
pub fn factor_table(tier: MonetizationTier) -> Vec<(&'static str, f64, &'static str)> {
    MONETIZATION_FACTORS
        .iter()
        .map(|f| (f.category, f.value(tier), f.color_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::impact_record::fixtures::record;

    fn sheet() -> ImpactTable {
        ImpactTable::new(
            vec![
                "Climate change (kg CO2 eq)".to_string(),
                "Land use (Pt)".to_string(),
                "Energy resources: non-renewable (MJ)".to_string(),
            ],
            vec![
                record("STL", 0, "1. Plant", "steel", vec![Some(10.0), Some(100.0), Some(50.0)]),
                record("STL", 1, "2. Beet", "beet", vec![Some(20.0), None, Some(25.0)]),
                record("HEFA", 0, "1. Plant", "steel", vec![Some(3.0), Some(1000.0), None]),
            ],
        )
    }

    fn options(tier: MonetizationTier, apply_co2_correction: bool) -> MonetizationOptions {
        MonetizationOptions { tier, apply_co2_correction }
    }

    #[test]
    fn test_mapping_uses_override_and_fuzzy_match() {
        let table = sheet();
        let mapping = map_columns(&table);
        assert_eq!(mapping.column_for(CLIMATE_CHANGE_CATEGORY), Some(0));
        assert_eq!(mapping.column_for("Land Use (Pt)"), Some(1));
        assert_eq!(mapping.column_for("Resource Use – Fossils (MJ)"), Some(2));
        assert!(mapping.unmatched.contains(&"Human Toxicity – Carcinogenic (CTUh)"));
    }

    #[test]
    fn test_cost_is_sum_of_impact_times_factor() {
        let table = sheet();
        let mapping = map_columns(&table);
        let result = monetize(&table, &mapping, &options(MonetizationTier::Central, false));

        let stl1 = result.rows.iter().find(|r| r.variant == "STL1").unwrap();
        let expected = 30.0 * 0.1025 + 100.0 * 0.000175 + 75.0 * 0.0013;
        assert!((stl1.total_cost - expected).abs() < 1e-12);
        assert!(!stl1.flagged);

        let breakdown_total: f64 = result
            .breakdown
            .iter()
            .filter(|c| c.variant == "STL1")
            .map(|c| c.cost)
            .sum();
        assert!((breakdown_total - stl1.total_cost).abs() < 1e-12);
    }

    #[test]
    fn test_co2_correction_is_per_row_and_flags_stl_ptl() {
        let table = sheet();
        let mapping = map_columns(&table);
        let result = monetize(&table, &mapping, &options(MonetizationTier::Low, true));

        let stl1 = result.rows.iter().find(|r| r.variant == "STL1").unwrap();
        let expected = (30.0 - 2.0 * 7.4) * 0.0615 + 100.0 * 0.000087 + 75.0 * 0.0;
        assert!((stl1.total_cost - expected).abs() < 1e-12);
        assert!(stl1.flagged);
        assert_eq!(stl1.cost_label(), "❌");

        let hefa1 = result.rows.iter().find(|r| r.variant == "HEFA1").unwrap();
        let expected = 3.0 * 0.0615 + 1000.0 * 0.000087;
        assert!((hefa1.total_cost - expected).abs() < 1e-12);
        assert!(!hefa1.flagged);

        let ptl1 = result.rows.iter().find(|r| r.variant == "PTL1").unwrap();
        assert!(ptl1.flagged);
        assert_eq!(ptl1.total_cost, 0.0);
    }

    #[test]
    fn test_labels_and_rounding() {
        let row = MonetizedRow { variant: "BTL", family: FuelFamily::Btl, total_cost: 1.23456, flagged: false };
        assert_eq!(row.cost_label(), "€1.23");
        assert_eq!(row.csv_value(), "1.23");

        let row = MonetizedRow { total_cost: 0.397825, ..row };
        assert_eq!(row.cost_label(), "€0.40");
        assert_eq!(row.csv_value(), "0.4");

        let row = MonetizedRow { total_cost: 0.0, ..row };
        assert_eq!(row.csv_value(), "0.0");

        let cost = CategoryCost {
            variant: "STL2",
            family: FuelFamily::Stl,
            category: "Water Use (m³ world eq.)",
            cost: 0.1,
            flagged: true,
        };
        assert_eq!(cost.label(), "STL2❌");
        assert_eq!(cost.clean_category(), "Water Use");
    }

    #[test]
    fn test_round_to_cents_breaks_exact_ties_to_even() {
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(0.375), 0.38);
        assert_eq!(round_to_cents(-0.125), -0.12);
        // Neither is an exact tie in binary
        assert_eq!(round_to_cents(2.675), 2.67);
        assert_eq!(round_to_cents(0.135), 0.14);
        assert_eq!(round_to_cents(1.115), 1.11);
        assert_eq!(round_to_cents(1.23456), 1.23);
    }

    #[test]
    fn test_factor_table_follows_tier() {
        let factors = factor_table(MonetizationTier::High);
        assert_eq!(factors.len(), 15);
        assert_eq!(factors[0], (CLIMATE_CHANGE_CATEGORY, 0.1936, "#ff4d4d"));
    }
}
