use comfy_table::{modifiers, presets, Cell, CellAlignment, ContentArrangement, Table};

use crate::analysis::contribution::ContributionRow;
use crate::analysis::monetization::{ColumnMapping, MonetizedRow};
use crate::analysis::overview::OverviewRow;
use crate::config::constants::OVERVIEW_TABLE_PRECISION;
use crate::models::impact_record::ImpactTable;
use crate::models::scenario_series::ScenarioSeries;

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn overview_table(rows: &[OverviewRow], impact: &str) -> Table {
    let mut table = styled_table();
    table.set_header(vec![Cell::new("Variant"), Cell::new(impact), Cell::new("Fuel type")]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.variant),
            number_cell(format!("{:.*}", OVERVIEW_TABLE_PRECISION, row.value)),
            Cell::new(row.family.code()),
        ]);
    }
    table
}

pub fn monetization_table(rows: &[MonetizedRow]) -> Table {
    let mut table = styled_table();
    table.set_header(vec!["Variant", "Fuel", "Monetized Cost (€)"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.variant),
            Cell::new(row.family.code()),
            number_cell(row.cost_label()),
        ]);
    }
    table
}

pub fn factor_table(factors: &[(&str, f64, &str)], tier: &str) -> Table {
    let mut table = styled_table();
    table.set_header(vec!["Impact category".to_string(), format!("{} factor (€/unit)", tier)]);
    for (category, factor, _) in factors {
        table.add_row(vec![Cell::new(category), number_cell(format!("{}", factor))]);
    }
    table
}

/// Monetization category → sheet column, unmatched categories last.
pub fn mapping_table(mapping: &ColumnMapping) -> Table {
    let mut table = styled_table();
    table.set_header(vec!["Monetization category", "Sheet column"]);
    for mapped in &mapping.mapped {
        let column = match mapped.column_index {
            Some(_) => mapped.column.clone(),
            None => format!("{} (not in sheet)", mapped.column),
        };
        table.add_row(vec![mapped.factor.category.to_string(), column]);
    }
    for category in &mapping.unmatched {
        table.add_row(vec![category.to_string(), "(no match)".to_string()]);
    }
    table
}

pub fn contribution_table(rows: &[ContributionRow]) -> Table {
    let mut table = styled_table();
    table.set_header(vec!["Variant", "Process group", "Contribution (%)"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.variant),
            Cell::new(row.stage.display_name()),
            number_cell(format!("{:.2}%", row.percent)),
        ]);
    }
    table
}

pub fn scenario_summary_table(scenarios: &[ScenarioSeries]) -> Table {
    let mut table = styled_table();
    table.set_header(vec!["Scenario", "Years", "Fuel columns"]);
    for series in scenarios {
        let years = match (series.years.first(), series.years.last()) {
            (Some(first), Some(last)) => format!("{}–{} ({} rows)", first, last, series.years.len()),
            _ => "no rows".to_string(),
        };
        table.add_row(vec![series.name.clone(), years, series.columns.join(", ")]);
    }
    table
}

/// First `limit` records with their derived stage.
pub fn raw_preview_table(table_data: &ImpactTable, limit: usize) -> Table {
    let mut table = styled_table();
    let mut header = vec![
        "System".to_string(),
        "Fuel".to_string(),
        "Scenario".to_string(),
        "Process".to_string(),
        "Stage".to_string(),
    ];
    header.extend(table_data.categories().iter().cloned());
    table.set_header(header);

    for record in table_data.records().iter().take(limit) {
        let mut row = vec![
            Cell::new(&record.system),
            Cell::new(&record.fuel),
            Cell::new(record.scenario.map(|s| s.to_string()).unwrap_or_default()),
            Cell::new(&record.process),
            Cell::new(record.stage.display_name()),
        ];
        row.extend(
            record
                .values
                .iter()
                .map(|v| number_cell(v.map(|v| format!("{:.4e}", v)).unwrap_or_default())),
        );
        table.add_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fuel::FuelFamily;
    use crate::models::life_cycle_stage::LifeCycleStage;

    #[test]
    fn test_overview_uses_ten_decimals() {
        let rows = vec![OverviewRow { variant: "STL1", family: FuelFamily::Stl, value: 1.5 }];
        let rendered = overview_table(&rows, "Climate change").to_string();
        assert!(rendered.contains("1.5000000000"));
        assert!(rendered.contains("Fuel type"));
    }

    #[test]
    fn test_monetization_marks_corrected_rows() {
        let rows = vec![
            MonetizedRow { variant: "STL1", family: FuelFamily::Stl, total_cost: 3.0, flagged: true },
            MonetizedRow { variant: "BTL", family: FuelFamily::Btl, total_cost: 0.456, flagged: false },
        ];
        let rendered = monetization_table(&rows).to_string();
        assert!(rendered.contains("❌"));
        assert!(rendered.contains("€0.46"));
    }

    #[test]
    fn test_contribution_percent_format() {
        let rows = vec![ContributionRow { variant: "BTL", stage: LifeCycleStage::Conversion, percent: 12.345 }];
        let rendered = contribution_table(&rows).to_string();
        assert!(rendered.contains("12.35%"));
        assert!(rendered.contains("4. Conversion"));
    }
}
