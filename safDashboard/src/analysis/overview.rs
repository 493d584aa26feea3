use serde::Serialize;

use crate::analysis::aggregation::variant_total;
use crate::config::constants::{CLIMATE_CHANGE_KEY, JET_FUEL_BASELINE, RED_III_TARGET};
use crate::config::variants::FUEL_VARIANTS;
use crate::models::fuel::FuelFamily;
use crate::models::impact_record::ImpactTable;
use crate::utils::logging::{self, AnalysisType, OperationCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub variant: &'static str,
    pub family: FuelFamily,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

/// Horizontal marker drawn across a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    pub style: LineStyle,
    pub color: &'static str,
}

/// Per-variant totals of one impact column, grouped by fuel family then label.
pub fn build_overview(table: &ImpactTable, column: usize) -> Vec<OverviewRow> {
    let _timing = logging::start_timing("build_overview",
        OperationCategory::Analysis { subcategory: AnalysisType::Aggregation });

    let mut rows: Vec<OverviewRow> = FUEL_VARIANTS
        .iter()
        .map(|variant| OverviewRow {
            variant: variant.label,
            family: variant.family,
            value: variant_total(table, variant, column),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.family
            .display_rank()
            .cmp(&b.family.display_rank())
            .then_with(|| a.variant.cmp(b.variant))
    });
    rows
}

/// Petroleum baseline and RED III target, shown only for climate-change indicators.
pub fn overview_reference_lines(impact: &str) -> Vec<ReferenceLine> {
    if !impact.to_lowercase().contains(CLIMATE_CHANGE_KEY) {
        return Vec::new();
    }
    vec![
        ReferenceLine {
            value: JET_FUEL_BASELINE,
            label: "Petroleum Jet Fuel Baseline".to_string(),
            style: LineStyle::Solid,
            color: "black",
        },
        ReferenceLine {
            value: RED_III_TARGET,
            label: "RED III 70% Reduction Target".to_string(),
            style: LineStyle::DashDot,
            color: "black",
        },
    ]
}
