use std::fmt;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::dashboard_config::DashboardConfig;
use crate::data::master_loader::load_impact_table;
use crate::error::DashboardError;
use crate::models::impact_record::ImpactTable;
use crate::utils::csv_export::CsvExporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Overview,
    Monetization,
    Contribution,
    Heatmap,
    Prospective,
    RawData,
    About,
}

impl PageKind {
    /// Rendering order of `all`.
    pub const ALL: [PageKind; 7] = [
        PageKind::Overview,
        PageKind::Monetization,
        PageKind::Contribution,
        PageKind::Heatmap,
        PageKind::Prospective,
        PageKind::RawData,
        PageKind::About,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PageKind::Overview => "(1) Overview",
            PageKind::Monetization => "(2) Monetization",
            PageKind::Contribution => "(3) Process Contribution",
            PageKind::Heatmap => "(4) Process Heatmap",
            PageKind::Prospective => "(5) Prospective",
            PageKind::RawData => "(6) Raw Data",
            PageKind::About => "About",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Shared inputs of one page render.
pub struct PageContext<'a> {
    pub config: &'a DashboardConfig,
    pub exporter: &'a CsvExporter,
}

impl<'a> PageContext<'a> {
    pub fn new(config: &'a DashboardConfig, exporter: &'a CsvExporter) -> Self {
        Self { config, exporter }
    }

    pub fn load_table(&self) -> Result<ImpactTable, DashboardError> {
        load_impact_table(&self.config.master_path())
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.exporter.path_for(file_name)
    }
}

/// Files written and warnings raised while rendering a page.
#[derive(Debug)]
pub struct PageOutput {
    pub page: PageKind,
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl PageOutput {
    pub fn new(page: PageKind) -> Self {
        Self {
            page,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn record_file(&mut self, path: impl AsRef<Path>) {
        self.files.push(path.as_ref().to_path_buf());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }
}

impl fmt::Display for PageOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for warning in &self.warnings {
            writeln!(f, "  ⚠️  {}", warning)?;
        }
        for file in &self.files {
            writeln!(f, "  wrote {}", file.display())?;
        }
        Ok(())
    }
}
