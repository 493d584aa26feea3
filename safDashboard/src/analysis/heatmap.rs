use std::collections::BTreeMap;

use crate::analysis::aggregation::variant_column_totals;
use crate::config::constants::MISSING_PROCESS_LABEL;
use crate::config::variants::FUEL_VARIANTS;
use crate::data::column_matcher::strip_parenthetical;
use crate::models::impact_record::ImpactTable;
use crate::utils::logging::{self, AnalysisType, OperationCategory};

/// Impact categories × variants, normalised per category.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapMatrix {
    /// Row labels from the bottom row up; the first sheet category ends up last.
    pub categories: Vec<String>,
    pub variants: Vec<&'static str>,
    /// Percent of the row maximum, `None` when the row maximum is zero.
    pub normalized: Vec<Vec<Option<f64>>>,
    /// Largest contributing process for each cell.
    pub top_process: Vec<Vec<String>>,
}

impl HeatmapMatrix {
    pub fn display_labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| strip_parenthetical(c)).collect()
    }
}

/// Process with the largest summed value; ties go to the first process name in order.
///
/// Rows without a process name are not grouped.
fn top_process<'a, I>(rows: I, column: usize) -> Option<String>
where
    I: Iterator<Item = &'a crate::models::impact_record::ImpactRecord>,
{
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for record in rows.filter(|r| !r.process.is_empty()) {
        let entry = sums.entry(record.process.as_str()).or_insert(0.0);
        if let Some(v) = record.value(column) {
            *entry += v;
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (process, sum) in sums {
        match best {
            Some((_, best_sum)) if sum <= best_sum => {}
            _ => best = Some((process, sum)),
        }
    }
    best.map(|(process, _)| process.to_string())
}

fn normalize_row(values: &[f64]) -> Vec<Option<f64>> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .map(|v| {
            if max == 0.0 || !max.is_finite() {
                None
            } else {
                Some(v / max * 100.0)
            }
        })
        .collect()
}

pub fn build_heatmap(table: &ImpactTable) -> HeatmapMatrix {
    let _timing = logging::start_timing("build_heatmap",
        OperationCategory::Analysis { subcategory: AnalysisType::Normalization });

    let categories = table.categories();
    let variants: Vec<&'static str> = FUEL_VARIANTS.iter().map(|v| v.label).collect();

    // totals[variant][category]
    let totals: Vec<Vec<f64>> = FUEL_VARIANTS
        .iter()
        .map(|variant| variant_column_totals(table, variant))
        .collect();

    let mut rows = Vec::with_capacity(categories.len());
    for (column, category) in categories.iter().enumerate() {
        let values: Vec<f64> = totals.iter().map(|t| t[column]).collect();
        let processes: Vec<String> = FUEL_VARIANTS
            .iter()
            .map(|variant| {
                top_process(table.variant_rows(variant), column)
                    .unwrap_or_else(|| MISSING_PROCESS_LABEL.to_string())
            })
            .collect();
        rows.push((category.clone(), normalize_row(&values), processes));
    }

    // First category is drawn at the top
    rows.reverse();

    let mut matrix = HeatmapMatrix {
        categories: Vec::with_capacity(rows.len()),
        variants,
        normalized: Vec::with_capacity(rows.len()),
        top_process: Vec::with_capacity(rows.len()),
    };
    for (category, normalized, processes) in rows {
        matrix.categories.push(category);
        matrix.normalized.push(normalized);
        matrix.top_process.push(processes);
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::impact_record::fixtures::record;

    fn table() -> ImpactTable {
        ImpactTable::new(
            vec!["Climate change (kg CO2 eq)".to_string(), "Land use (Pt)".to_string()],
            vec![
                record("STL", 0, "1. Plant", "steel", vec![Some(1.0), Some(0.0)]),
                record("STL", 1, "2. Beet", "sugar beet", vec![Some(3.0), Some(0.0)]),
                record("STL", 1, "2. Beet", "fertiliser", vec![Some(1.0), Some(0.0)]),
                record("HEFA", 0, "2. Oil", "palm oil", vec![Some(8.0), Some(0.0)]),
            ],
        )
    }

    #[test]
    fn test_rows_are_reversed_and_normalized_to_row_max() {
        let matrix = build_heatmap(&table());
        assert_eq!(matrix.categories, vec!["Land use (Pt)".to_string(), "Climate change (kg CO2 eq)".to_string()]);
        assert_eq!(matrix.display_labels(), vec!["Land use".to_string(), "Climate change".to_string()]);

        let climate = &matrix.normalized[1];
        // HEFA variants all reach 8.0, STL1 totals 5.0
        assert_eq!(climate[0], Some(62.5));
        assert_eq!(climate[12], Some(100.0));
        assert_eq!(climate[3], Some(0.0));

        // All-zero row has no maximum to normalise against
        assert!(matrix.normalized[0].iter().all(Option::is_none));
    }

    #[test]
    fn test_top_process_per_cell() {
        let matrix = build_heatmap(&table());
        let climate = &matrix.top_process[1];
        assert_eq!(climate[0], "sugar beet");
        assert_eq!(climate[1], "steel");
        assert_eq!(climate[12], "palm oil");
        assert_eq!(climate[3], "N/A");

        // Ties resolve to the first process name in sorted order
        let land = &matrix.top_process[0];
        assert_eq!(land[0], "fertiliser");
    }

    #[test]
    fn test_blank_process_names_are_not_grouped() {
        let table = ImpactTable::new(
            vec!["Climate change (kg CO2 eq)".to_string()],
            vec![
                record("STL", 0, "1. Plant", "steel", vec![Some(2.0)]),
                record("STL", 1, "2. Beet", "", vec![Some(9.0)]),
                record("BTL", 0, "2. Forest", "", vec![Some(4.0)]),
            ],
        );
        let matrix = build_heatmap(&table);
        assert_eq!(matrix.top_process[0][0], "steel");
        assert_eq!(matrix.top_process[0][11], "N/A");
        // The value still counts toward the variant total
        assert_eq!(matrix.normalized[0][0], Some(100.0));
    }
}
