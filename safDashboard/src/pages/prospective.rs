use crate::analysis::prospective::{
    build_trend_view, echarts_options, fuel_title_color, grid_fuel_columns, grid_reference_lines,
    scenario_color, scenario_line_style, shared_y_bounds, trend_reference_lines, EMISSION_AXIS_LABEL,
};
use crate::analysis::overview::LineStyle;
use crate::config::constants::GRID_COLUMNS;
use crate::data::scenario_loader::load_scenarios;
use crate::error::DashboardError;
use crate::models::scenario_series::ScenarioSeries;
use crate::pages::page_output::{PageContext, PageKind, PageOutput};
use crate::render::charts::{line_chart, line_grid, GridPanel, LineSpec};
use crate::render::colors::parse_color;
use crate::render::tables::scenario_summary_table;
use crate::utils::logging::{self, OperationCategory};

pub const TREND_CHART_FILE: &str = "prospective_trends.svg";
pub const TREND_OPTIONS_FILE: &str = "prospective_trends.json";
pub const GRID_CHART_FILE: &str = "prospective_grid.svg";

#[derive(Debug, Clone, Default)]
pub struct ProspectiveOptions {
    /// Scenario names; every loaded scenario when empty.
    pub datasets: Vec<String>,
    /// Fuel columns; the first column of the first dataset when empty.
    pub columns: Vec<String>,
}

fn to_points(points: &[(i32, f64)]) -> Vec<(f64, f64)> {
    points.iter().map(|(year, value)| (*year as f64, *value)).collect()
}

fn grid_panels(scenarios: &[ScenarioSeries], columns: &[String]) -> Vec<GridPanel> {
    columns
        .iter()
        .map(|column| GridPanel {
            title: column.clone(),
            title_color: parse_color(fuel_title_color(column)),
            lines: scenarios
                .iter()
                .filter(|s| s.column(column).is_some())
                .map(|s| LineSpec {
                    name: s.name.clone(),
                    color: parse_color(scenario_color(&s.name)),
                    style: scenario_line_style(&s.name),
                    points: to_points(&s.points(column)),
                })
                .collect(),
        })
        .collect()
}

pub fn render(ctx: &PageContext<'_>, options: &ProspectiveOptions) -> Result<PageOutput, DashboardError> {
    let _timing = logging::start_timing("prospective_page", OperationCategory::Page);
    let mut output = PageOutput::new(PageKind::Prospective);

    let (scenarios, warnings) = load_scenarios(ctx.config)?;
    output.warnings.extend(warnings);
    if scenarios.is_empty() {
        output.warn("No scenario files could be loaded");
        return Ok(output);
    }
    println!("{}", scenario_summary_table(&scenarios));

    // Trend view
    match build_trend_view(&scenarios, &options.datasets, &options.columns)? {
        Some(view) => {
            let lines: Vec<LineSpec> = view
                .series
                .iter()
                .map(|s| LineSpec {
                    name: s.name.clone(),
                    color: parse_color(s.color),
                    style: LineStyle::Solid,
                    points: to_points(&s.points),
                })
                .collect();

            let path = ctx.output_path(TREND_CHART_FILE);
            line_chart(
                &path,
                "Yearly Trends Across Scenarios",
                EMISSION_AXIS_LABEL,
                &lines,
                &trend_reference_lines(),
            )?;
            output.record_file(&path);

            let json_path = ctx.exporter.write_json(TREND_OPTIONS_FILE, &echarts_options(&view))?;
            output.record_file(json_path);
        }
        None => output.warn("Selected scenarios have no data columns"),
    }

    // Grid view
    let columns = grid_fuel_columns(&scenarios);
    match shared_y_bounds(&scenarios, &columns) {
        Some(bounds) => {
            let panels = grid_panels(&scenarios, &columns);
            let path = ctx.output_path(GRID_CHART_FILE);
            line_grid(&path, &panels, GRID_COLUMNS, bounds, &grid_reference_lines())?;
            output.record_file(&path);
            println!("{} Fuel Types - {} Scenarios (Up to 2050)", columns.len(), scenarios.len());
        }
        None => output.warn("Scenario files hold no values to plot"),
    }

    Ok(output)
}
