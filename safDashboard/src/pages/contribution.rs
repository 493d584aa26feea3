use crate::analysis::contribution::build_contributions;
use crate::data::column_matcher::resolve_category;
use crate::error::DashboardError;
use crate::models::life_cycle_stage::LifeCycleStage;
use crate::pages::page_output::{PageContext, PageKind, PageOutput};
use crate::render::charts::{stacked_bar_chart, StackSegment};
use crate::render::colors::parse_color;
use crate::render::tables::contribution_table;
use crate::utils::logging::{self, OperationCategory};

pub const CHART_FILE: &str = "process_contribution.svg";

#[derive(Debug, Clone, Default)]
pub struct ContributionOptions {
    pub impact: Option<String>,
}

pub fn render(ctx: &PageContext<'_>, options: &ContributionOptions) -> Result<PageOutput, DashboardError> {
    let _timing = logging::start_timing("contribution_page", OperationCategory::Page);
    let mut output = PageOutput::new(PageKind::Contribution);

    let table = ctx.load_table()?;
    let impact = resolve_category(options.impact.as_deref(), table.categories())?;
    let column = table.require_column(&impact)?;
    let rows = build_contributions(&table, column);

    if rows.is_empty() {
        output.warn(format!("No fuel variant has rows for {}", impact));
        return Ok(output);
    }

    let mut variants: Vec<&'static str> = Vec::new();
    for row in &rows {
        if !variants.contains(&row.variant) {
            variants.push(row.variant);
        }
    }

    // Stage-major so every bar stacks construction first
    let mut segments = Vec::with_capacity(rows.len());
    for stage in LifeCycleStage::ORDERED.iter() {
        for row in rows.iter().filter(|r| r.stage == *stage) {
            let Some(bar) = variants.iter().position(|v| *v == row.variant) else {
                continue;
            };
            segments.push(StackSegment {
                bar,
                series: stage.display_name().to_string(),
                value: row.percent,
                color: parse_color(stage.color()),
            });
        }
    }

    let bar_labels: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
    let path = ctx.output_path(CHART_FILE);
    stacked_bar_chart(
        &path,
        &format!("{} Contribution by System Group per Fuel Variant", impact),
        "Contribution (%)",
        &bar_labels,
        &segments,
    )?;
    output.record_file(&path);

    println!("{}", contribution_table(&rows));
    Ok(output)
}
