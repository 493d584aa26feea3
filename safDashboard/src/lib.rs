// Module declarations for the SAF LCA dashboard

// Static configuration: variants, factors, constants
pub mod config {
    pub mod constants;
    pub mod variants;
    pub mod monetization_factors;
    pub mod dashboard_config;
}

// Model definitions
pub mod models {
    pub mod fuel;
    pub mod life_cycle_stage;
    pub mod impact_record;
    pub mod scenario_series;
}

// Data loaders
pub mod data {
    pub mod master_loader;
    pub mod scenario_loader;
    pub mod column_matcher;
}

// Aggregations behind each page
pub mod analysis {
    pub mod aggregation;
    pub mod overview;
    pub mod monetization;
    pub mod contribution;
    pub mod heatmap;
    pub mod prospective;
}

// Chart and table output
pub mod render {
    pub mod colors;
    pub mod charts;
    pub mod tables;
}

// One module per dashboard page
pub mod pages {
    pub mod overview;
    pub mod monetization;
    pub mod contribution;
    pub mod heatmap;
    pub mod prospective;
    pub mod raw_data;
    pub mod about;
    pub mod page_output;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

pub mod error;

// Re-export commonly used items
pub use crate::error::DashboardError;
pub use crate::models::impact_record::{ImpactRecord, ImpactTable};
pub use crate::config::variants::{FuelVariant, FUEL_VARIANTS};
pub use crate::config::dashboard_config::DashboardConfig;
