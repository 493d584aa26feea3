use crate::analysis::heatmap::build_heatmap;
use crate::error::DashboardError;
use crate::pages::page_output::{PageContext, PageKind, PageOutput};
use crate::render::charts::heatmap_chart;
use crate::utils::logging::{self, OperationCategory};

pub const CHART_FILE: &str = "process_heatmap.svg";

pub fn render(ctx: &PageContext<'_>) -> Result<PageOutput, DashboardError> {
    let _timing = logging::start_timing("heatmap_page", OperationCategory::Page);
    let mut output = PageOutput::new(PageKind::Heatmap);

    let table = ctx.load_table()?;
    let matrix = build_heatmap(&table);

    let empty_rows = matrix
        .normalized
        .iter()
        .zip(matrix.categories.iter())
        .filter(|(row, _)| row.iter().all(Option::is_none));
    for (_, category) in empty_rows {
        output.warn(format!("{} is zero for every variant; row left blank", category));
    }

    let path = ctx.output_path(CHART_FILE);
    heatmap_chart(&path, "Top-Contributing Process per Environmental Impact", &matrix)?;
    output.record_file(&path);

    println!(
        "Heatmap of {} impact categories × {} variants, cells show relative impact (%) and top process",
        matrix.categories.len(),
        matrix.variants.len()
    );
    Ok(output)
}
