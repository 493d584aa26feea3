use serde_json::{json, Value};

use crate::analysis::overview::{LineStyle, ReferenceLine};
use crate::config::constants::{
    DEFAULT_SERIES_COLOR, JET_FUEL_BASELINE, MIDDLE_SCENARIO, OPTIMISTIC_SCENARIO, PESSIMISTIC_SCENARIO,
    RED_III_TARGET,
};
use crate::error::DashboardError;
use crate::models::fuel::FuelFamily;
use crate::models::scenario_series::ScenarioSeries;

pub const EMISSION_AXIS_LABEL: &str = "kg CO₂-eq/kg fuel";

pub fn scenario_color(name: &str) -> &'static str {
    match name {
        OPTIMISTIC_SCENARIO => "green",
        MIDDLE_SCENARIO => "black",
        PESSIMISTIC_SCENARIO => "red",
        _ => DEFAULT_SERIES_COLOR,
    }
}

pub fn scenario_line_style(name: &str) -> LineStyle {
    match name {
        MIDDLE_SCENARIO => LineStyle::Dashed,
        PESSIMISTIC_SCENARIO => LineStyle::Dotted,
        _ => LineStyle::Solid,
    }
}

/// One line of the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub name: String,
    pub color: &'static str,
    pub points: Vec<(i32, f64)>,
    /// Raw column values aligned with the first dataset's years, gaps kept.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendView {
    pub years: Vec<i32>,
    pub series: Vec<TrendSeries>,
}

/// Lines for the selected datasets × columns.
///
/// Datasets default to every loaded scenario; columns default to the first
/// data column of the first selected dataset.
pub fn build_trend_view(
    scenarios: &[ScenarioSeries],
    datasets: &[String],
    columns: &[String],
) -> Result<Option<TrendView>, DashboardError> {
    let selected: Vec<&ScenarioSeries> = if datasets.is_empty() {
        scenarios.iter().collect()
    } else {
        datasets
            .iter()
            .map(|name| {
                scenarios
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| DashboardError::InvalidLayout(format!("Scenario {} is not loaded", name)))
            })
            .collect::<Result<_, _>>()?
    };

    let Some(first) = selected.first() else {
        return Ok(None);
    };

    let columns: Vec<String> = if columns.is_empty() {
        match first.columns.first() {
            Some(column) => vec![column.clone()],
            None => return Ok(None),
        }
    } else {
        columns.to_vec()
    };

    let mut series = Vec::new();
    for dataset in &selected {
        for column in &columns {
            let values = dataset.column(column).ok_or_else(|| {
                DashboardError::InvalidLayout(format!("Scenario {} has no column {}", dataset.name, column))
            })?;
            series.push(TrendSeries {
                name: format!("{} - {}", dataset.name, column),
                color: scenario_color(&dataset.name),
                points: dataset.points(column),
                values: values.to_vec(),
            });
        }
    }

    Ok(Some(TrendView {
        years: first.years.clone(),
        series,
    }))
}

pub fn trend_reference_lines() -> Vec<ReferenceLine> {
    vec![
        ReferenceLine {
            value: RED_III_TARGET,
            label: format!("RED III Target ({})", RED_III_TARGET),
            style: LineStyle::Dashed,
            color: "#444444",
        },
        ReferenceLine {
            value: JET_FUEL_BASELINE,
            label: format!("Jet Fuel Baseline ({})", JET_FUEL_BASELINE),
            style: LineStyle::Solid,
            color: "#222222",
        },
    ]
}

/// Thinner markers for the small-multiple grid.
pub fn grid_reference_lines() -> Vec<ReferenceLine> {
    vec![
        ReferenceLine {
            value: JET_FUEL_BASELINE,
            label: "Jet Fuel Baseline".to_string(),
            style: LineStyle::Solid,
            color: "gray",
        },
        ReferenceLine {
            value: RED_III_TARGET,
            label: "RED III Target".to_string(),
            style: LineStyle::DashDot,
            color: "black",
        },
    ]
}

/// ECharts option document equivalent to the trend chart.
pub fn echarts_options(view: &TrendView) -> Value {
    let mark_lines: Vec<Value> = trend_reference_lines()
        .iter()
        .map(|line| {
            let kind = if line.style == LineStyle::Dashed { "dash" } else { "solid" };
            json!({
                "yAxis": line.value,
                "lineStyle": {
                    "type": kind,
                    "color": line.color,
                },
                "label": { "formatter": line.label, "position": "end" },
            })
        })
        .collect();

    let series: Vec<Value> = view
        .series
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "type": "line",
                "data": s.values,
                "lineStyle": { "color": s.color },
                "itemStyle": { "color": s.color },
                "markLine": { "data": mark_lines },
            })
        })
        .collect();

    json!({
        "title": { "text": "Yearly Trends Across Scenarios" },
        "tooltip": { "trigger": "axis" },
        "legend": {
            "type": "scroll",
            "orient": "horizontal",
            "top": "bottom",
            "data": view.series.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
        },
        "xAxis": { "type": "category", "data": view.years, "name": "Year" },
        "yAxis": { "type": "value", "name": EMISSION_AXIS_LABEL },
        "series": series,
    })
}

fn fuel_sort_key(fuel: &str) -> (usize, String) {
    let rank = FuelFamily::from_label(fuel)
        .map(|family| family.display_rank())
        .unwrap_or(FuelFamily::ALL.len());
    (rank, fuel.to_string())
}

/// Panel title colour for a fuel column.
pub fn fuel_title_color(fuel: &str) -> &'static str {
    FuelFamily::from_label(fuel)
        .map(|family| family.grid_title_color())
        .unwrap_or("black")
}

/// Fuel columns of the reference scenario in family order.
pub fn grid_fuel_columns(scenarios: &[ScenarioSeries]) -> Vec<String> {
    let reference = scenarios
        .iter()
        .find(|s| s.name == OPTIMISTIC_SCENARIO)
        .or_else(|| scenarios.first());

    let mut columns = match reference {
        Some(series) => series.columns.clone(),
        None => return Vec::new(),
    };
    columns.sort_by_key(|c| fuel_sort_key(c));
    columns
}

/// Shared y range over every scenario and fuel column.
pub fn shared_y_bounds(scenarios: &[ScenarioSeries], columns: &[String]) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for series in scenarios {
        for column in columns {
            for (_, value) in series.points(column) {
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(value), hi.max(value)),
                    None => (value, value),
                });
            }
        }
    }
    bounds
}
