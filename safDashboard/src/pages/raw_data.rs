use crate::config::variants::find_variant;
use crate::error::DashboardError;
use crate::pages::page_output::{PageContext, PageKind, PageOutput};
use crate::render::tables::raw_preview_table;
use crate::utils::logging::{self, OperationCategory};

pub const EXPORT_FILE: &str = "raw_data.csv";
const DEFAULT_PREVIEW_ROWS: usize = 20;

#[derive(Debug, Clone)]
pub struct RawDataOptions {
    /// Restricts the export to one fuel variant.
    pub variant: Option<String>,
    pub preview_rows: usize,
}

impl Default for RawDataOptions {
    fn default() -> Self {
        Self {
            variant: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

pub fn render(ctx: &PageContext<'_>, options: &RawDataOptions) -> Result<PageOutput, DashboardError> {
    let _timing = logging::start_timing("raw_data_page", OperationCategory::Page);
    let mut output = PageOutput::new(PageKind::RawData);

    let table = ctx.load_table()?;
    let (path, count) = match options.variant.as_deref() {
        Some(label) => {
            let variant = find_variant(label)?;
            let file_name = format!("raw_data_{}.csv", variant.label);
            ctx.exporter
                .export_raw_data(&file_name, table.categories(), table.variant_rows(variant))?
        }
        None => ctx
            .exporter
            .export_raw_data(EXPORT_FILE, table.categories(), table.records())?,
    };
    output.record_file(&path);

    if count == 0 {
        output.warn("No rows matched the selection");
    }

    println!("{} of {} rows exported with their life-cycle stage", count, table.len());
    if options.preview_rows > 0 {
        println!("{}", raw_preview_table(&table, options.preview_rows));
    }
    Ok(output)
}
