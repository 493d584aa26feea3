use crate::analysis::monetization::{factor_table, map_columns, monetize, MonetizationOptions};
use crate::config::monetization_factors::{MonetizationTier, MONETIZATION_FACTORS};
use crate::error::DashboardError;
use crate::pages::page_output::{PageContext, PageKind, PageOutput};
use crate::render::charts::{bar_chart, stacked_bar_chart, BarSpec, StackSegment};
use crate::render::colors::parse_color;
use crate::render::tables;
use crate::utils::logging::{self, OperationCategory};

pub const FACTOR_CHART_FILE: &str = "monetization_factors.svg";
pub const BREAKDOWN_CHART_FILE: &str = "monetization_breakdown.svg";

#[derive(Debug, Clone, Copy, Default)]
pub struct MonetizationPageOptions {
    pub tier: MonetizationTier,
    pub co2_correction: bool,
    pub export_csv: bool,
}

fn category_color(category: &str) -> &'static str {
    MONETIZATION_FACTORS
        .iter()
        .find(|f| f.category == category)
        .map(|f| f.color_or_default())
        .unwrap_or(crate::config::constants::FALLBACK_CATEGORY_COLOR)
}

pub fn render(ctx: &PageContext<'_>, options: &MonetizationPageOptions) -> Result<PageOutput, DashboardError> {
    let _timing = logging::start_timing("monetization_page", OperationCategory::Page);
    let mut output = PageOutput::new(PageKind::Monetization);
    // Nothing is written when the workbook is missing
    let table = ctx.load_table()?;

    // Factor overview of the chosen tier
    let factors = factor_table(options.tier);
    let factor_bars: Vec<BarSpec> = factors
        .iter()
        .map(|(category, factor, color)| BarSpec {
            label: category.to_string(),
            value: *factor,
            color: parse_color(color),
            legend: None,
        })
        .collect();
    let factor_path = ctx.output_path(FACTOR_CHART_FILE);
    bar_chart(
        &factor_path,
        &format!("Monetization Factors - {} Scenario", options.tier),
        "€ per unit",
        &factor_bars,
        &[],
        false,
    )?;
    output.record_file(&factor_path);
    println!("Factors from {} scenario", options.tier);
    println!("{}", tables::factor_table(&factors, &options.tier.to_string()));

    let mapping = map_columns(&table);
    for category in &mapping.unmatched {
        output.warn(format!("No sheet column matches {}; category left out", category));
    }
    for mapped in mapping.mapped.iter().filter(|m| m.column_index.is_none()) {
        output.warn(format!("Column {} for {} is not in the sheet", mapped.column, mapped.factor.category));
    }
    println!("{}", tables::mapping_table(&mapping));

    let result = monetize(
        &table,
        &mapping,
        &MonetizationOptions {
            tier: options.tier,
            apply_co2_correction: options.co2_correction,
        },
    );

    println!("Total Monetized Cost per Fuel Variant");
    println!("{}", tables::monetization_table(&result.rows));

    // Breakdown bars follow the row order
    let bar_labels: Vec<String> = result
        .rows
        .iter()
        .map(|row| {
            result
                .breakdown
                .iter()
                .find(|cost| cost.variant == row.variant)
                .map(|cost| cost.label())
                .unwrap_or_else(|| row.variant.to_string())
        })
        .collect();
    let segments: Vec<StackSegment> = result
        .breakdown
        .iter()
        .filter_map(|cost| {
            let bar = result.rows.iter().position(|row| row.variant == cost.variant)?;
            Some(StackSegment {
                bar,
                series: cost.clean_category().to_string(),
                value: cost.cost,
                color: parse_color(category_color(cost.category)),
            })
        })
        .collect();

    let breakdown_path = ctx.output_path(BREAKDOWN_CHART_FILE);
    stacked_bar_chart(
        &breakdown_path,
        "Variant-wise Monetized Cost Breakdown by Impact Category",
        "External Cost (€/kg fuel)",
        &bar_labels,
        &segments,
    )?;
    output.record_file(&breakdown_path);

    if options.export_csv {
        let csv_path = ctx.exporter.export_monetization(&result.rows)?;
        output.record_file(csv_path);
    }

    Ok(output)
}
