use std::path::PathBuf;

#[derive(Debug)]
pub enum DashboardError {
    IoError(std::io::Error),
    CsvError(csv::Error),
    WorkbookError(calamine::Error),
    JsonError(serde_json::Error),
    MissingInput(PathBuf),
    InvalidLayout(String),
    UnknownImpactCategory(String),
    UnknownVariant(String),
    ChartError(String),
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::IoError(err)
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::CsvError(err)
    }
}

impl From<calamine::Error> for DashboardError {
    fn from(err: calamine::Error) -> Self {
        DashboardError::WorkbookError(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::JsonError(err)
    }
}

impl From<Box<dyn std::error::Error>> for DashboardError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        DashboardError::ChartError(err.to_string())
    }
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::IoError(e) => write!(f, "IO error: {}", e),
            DashboardError::CsvError(e) => write!(f, "CSV error: {}", e),
            DashboardError::WorkbookError(e) => write!(f, "Workbook error: {}", e),
            DashboardError::JsonError(e) => write!(f, "JSON error: {}", e),
            DashboardError::MissingInput(path) => write!(f, "Could not find {}", path.display()),
            DashboardError::InvalidLayout(s) => write!(f, "Invalid sheet layout: {}", s),
            DashboardError::UnknownImpactCategory(s) => write!(f, "Unknown impact category: {}", s),
            DashboardError::UnknownVariant(s) => write!(f, "Unknown fuel variant: {}", s),
            DashboardError::ChartError(s) => write!(f, "Chart error: {}", s),
        }
    }
}

impl std::error::Error for DashboardError {}

impl DashboardError {
    /// Missing inputs are reported to the user and stop only the affected page.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, DashboardError::MissingInput(_))
    }
}
