// Reference Lines (kg CO₂-eq / kg fuel)
pub const JET_FUEL_BASELINE: f64 = 4.127;
pub const RED_III_TARGET: f64 = 1.238;          // 70% below the petroleum baseline

// Sheet Layout
pub const SYSTEM_COLUMN: usize = 0;
pub const FUEL_COLUMN: usize = 1;
pub const SCENARIO_COLUMN: usize = 2;
pub const PROCESS_COLUMN: usize = 3;
pub const FIRST_IMPACT_COLUMN: usize = 4;

// Default Input Files
pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_MASTER_FILE: &str = "master.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "dashboard_output";
pub const OPTIMISTIC_SCENARIO: &str = "Optimistic";
pub const MIDDLE_SCENARIO: &str = "Middle";
pub const PESSIMISTIC_SCENARIO: &str = "Pessimistic";

// Prospective Scenarios
pub const YEAR_COLUMN: &str = "Year";
pub const PROSPECTIVE_MAX_YEAR: i32 = 2050;

// Monetization
pub const CLIMATE_CHANGE_KEY: &str = "climate change";
pub const STL_CO2_CORRECTION: f64 = 7.4;        // kg CO₂ per row, STL family
pub const PTL_CO2_CORRECTION: f64 = 6.34;       // kg CO₂ per row, PTL family
pub const CORRECTED_MARK: &str = "❌";
pub const MONETIZATION_EXPORT_FILE: &str = "fuel_variant_monetization.csv";
pub const FALLBACK_CATEGORY_COLOR: &str = "#000000";

// Column Matching
pub const FUZZY_MATCH_CUTOFF: f64 = 0.6;

// Heatmap
pub const HEATMAP_DARK_TEXT_THRESHOLD: f64 = 60.0;
pub const MISSING_PROCESS_LABEL: &str = "N/A";

// Display
pub const OVERVIEW_TABLE_PRECISION: usize = 10;
pub const CONTRIBUTION_COLORS: [&str; 6] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3",
];
pub const DEFAULT_SERIES_COLOR: &str = "blue";
pub const GRID_COLUMNS: usize = 4;

// Chart Sizes (pixels)
pub const BAR_CHART_SIZE: (u32, u32) = (1280, 720);
pub const STACKED_CHART_SIZE: (u32, u32) = (1280, 760);
pub const HEATMAP_SIZE: (u32, u32) = (1200, 1000);
pub const TREND_CHART_SIZE: (u32, u32) = (1280, 600);
pub const GRID_PANEL_SIZE: (u32, u32) = (480, 300);
