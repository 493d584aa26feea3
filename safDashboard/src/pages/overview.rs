use crate::analysis::overview::{build_overview, overview_reference_lines};
use crate::data::column_matcher::resolve_category;
use crate::error::DashboardError;
use crate::pages::page_output::{PageContext, PageKind, PageOutput};
use crate::render::charts::{bar_chart, BarSpec};
use crate::render::colors::parse_color;
use crate::render::tables::overview_table;
use crate::utils::logging::{self, OperationCategory};

pub const CHART_FILE: &str = "overview.svg";
const Y_AXIS_TITLE: &str = "kg CO₂-eq / kg fuel";

#[derive(Debug, Clone, Default)]
pub struct OverviewOptions {
    /// Impact category; the first sheet column when absent.
    pub impact: Option<String>,
}

pub fn render(ctx: &PageContext<'_>, options: &OverviewOptions) -> Result<PageOutput, DashboardError> {
    let _timing = logging::start_timing("overview_page", OperationCategory::Page);
    let mut output = PageOutput::new(PageKind::Overview);

    let table = ctx.load_table()?;
    let impact = resolve_category(options.impact.as_deref(), table.categories())?;
    let column = table.require_column(&impact)?;

    let rows = build_overview(&table, column);
    let bars: Vec<BarSpec> = rows
        .iter()
        .map(|row| BarSpec {
            label: row.variant.to_string(),
            value: row.value,
            color: parse_color(ctx.config.fuel_color(row.family)),
            legend: Some(row.family.code().to_string()),
        })
        .collect();

    let path = ctx.output_path(CHART_FILE);
    bar_chart(
        &path,
        &format!("{} by Fuel Variant", impact),
        Y_AXIS_TITLE,
        &bars,
        &overview_reference_lines(&impact),
        true,
    )?;
    output.record_file(&path);

    println!("{}", overview_table(&rows, &impact));
    Ok(output)
}
