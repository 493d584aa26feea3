use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::monetization_factors::MonetizationTier;
use crate::pages::contribution::ContributionOptions;
use crate::pages::monetization::MonetizationPageOptions;
use crate::pages::overview::OverviewOptions;
use crate::pages::page_output::PageKind;
use crate::pages::prospective::ProspectiveOptions;
use crate::pages::raw_data::RawDataOptions;

#[derive(Parser)]
#[command(author, version, about = "SAF life-cycle assessment dashboard", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "Directory holding the workbook and scenario CSVs")]
    data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory charts and exports are written to")]
    output_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "JSON dashboard configuration")]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false, help = "Write directly into the output directory")]
    no_timestamp: bool,

    #[arg(long, global = true, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, global = true, default_value_t = false)]
    debug_logging: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Per-variant totals of one impact category
    Overview {
        #[arg(short, long, help = "Impact category (default: first sheet column)")]
        impact: Option<String>,

        #[arg(long = "color", value_name = "FAMILY=#RRGGBB", help = "Override a fuel family colour")]
        colors: Vec<String>,
    },
    /// External costs per variant
    Monetization {
        #[arg(short, long, value_enum, default_value_t = MonetizationTier::Central)]
        tier: MonetizationTier,

        #[arg(long, default_value_t = false, help = "Apply CO₂ correction (-7.4kg for STL, -6.34kg for PTL)")]
        co2_correction: bool,

        #[arg(long, default_value_t = false, help = "Skip the monetization CSV export")]
        no_export: bool,
    },
    /// Life-cycle stage shares per variant
    Contribution {
        #[arg(short, long, help = "Impact category (default: first sheet column)")]
        impact: Option<String>,
    },
    /// Normalised impacts with the top process per cell
    Heatmap,
    /// Scenario trends up to 2050
    Prospective {
        #[arg(short, long = "dataset", help = "Scenario to plot (repeatable, default: all loaded)")]
        datasets: Vec<String>,

        #[arg(short, long = "column", help = "Fuel column to plot (repeatable, default: first column)")]
        columns: Vec<String>,
    },
    /// Export the loaded sheet with its derived stage
    Raw {
        #[arg(short, long, help = "Only rows of this fuel variant")]
        variant: Option<String>,

        #[arg(long, default_value_t = 20, help = "Rows to preview in the terminal")]
        preview_rows: usize,
    },
    /// Dashboard purpose and page structure
    About,
    /// Render every page with default settings
    All,
}

impl Command {
    /// The single page this command renders; `None` for `all`.
    pub fn page(&self) -> Option<PageKind> {
        match self {
            Command::Overview { .. } => Some(PageKind::Overview),
            Command::Monetization { .. } => Some(PageKind::Monetization),
            Command::Contribution { .. } => Some(PageKind::Contribution),
            Command::Heatmap => Some(PageKind::Heatmap),
            Command::Prospective { .. } => Some(PageKind::Prospective),
            Command::Raw { .. } => Some(PageKind::RawData),
            Command::About => Some(PageKind::About),
            Command::All => None,
        }
    }

    pub fn overview_options(&self) -> OverviewOptions {
        match self {
            Command::Overview { impact, .. } => OverviewOptions { impact: impact.clone() },
            _ => OverviewOptions::default(),
        }
    }

    pub fn monetization_options(&self) -> MonetizationPageOptions {
        match self {
            Command::Monetization { tier, co2_correction, no_export } => MonetizationPageOptions {
                tier: *tier,
                co2_correction: *co2_correction,
                export_csv: !no_export,
            },
            _ => MonetizationPageOptions {
                export_csv: true,
                ..MonetizationPageOptions::default()
            },
        }
    }

    pub fn contribution_options(&self) -> ContributionOptions {
        match self {
            Command::Contribution { impact } => ContributionOptions { impact: impact.clone() },
            _ => ContributionOptions::default(),
        }
    }

    pub fn prospective_options(&self) -> ProspectiveOptions {
        match self {
            Command::Prospective { datasets, columns } => ProspectiveOptions {
                datasets: datasets.clone(),
                columns: columns.clone(),
            },
            _ => ProspectiveOptions::default(),
        }
    }

    pub fn raw_data_options(&self) -> RawDataOptions {
        match self {
            Command::Raw { variant, preview_rows } => RawDataOptions {
                variant: variant.clone(),
                preview_rows: *preview_rows,
            },
            _ => RawDataOptions::default(),
        }
    }

    pub fn color_overrides(&self) -> &[String] {
        match self {
            Command::Overview { colors, .. } => colors,
            _ => &[],
        }
    }
}

// Getter methods for all fields
impl Args {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn data_dir(&self) -> Option<&PathBuf> {
        self.data_dir.as_ref()
    }

    pub fn output_dir(&self) -> Option<&PathBuf> {
        self.output_dir.as_ref()
    }

    pub fn config(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn no_timestamp(&self) -> bool {
        self.no_timestamp
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
