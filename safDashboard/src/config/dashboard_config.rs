use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_DATA_DIR, DEFAULT_MASTER_FILE, DEFAULT_OUTPUT_DIR,
    OPTIMISTIC_SCENARIO, MIDDLE_SCENARIO, PESSIMISTIC_SCENARIO,
};
use crate::error::DashboardError;
use crate::models::fuel::FuelFamily;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub name: String,
    pub file: String,
}

impl ScenarioFile {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file: format!("{}.csv", name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub master_file: String,
    pub scenario_files: Vec<ScenarioFile>,
    pub output_dir: PathBuf,
    pub timestamped_output: bool,
    pub fuel_colors: BTreeMap<FuelFamily, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            master_file: DEFAULT_MASTER_FILE.to_string(),
            scenario_files: vec![
                ScenarioFile::named(OPTIMISTIC_SCENARIO),
                ScenarioFile::named(MIDDLE_SCENARIO),
                ScenarioFile::named(PESSIMISTIC_SCENARIO),
            ],
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timestamped_output: true,
            fuel_colors: FuelFamily::ALL
                .iter()
                .map(|family| (*family, family.default_color().to_string()))
                .collect(),
        }
    }
}

impl DashboardConfig {
    /// Reads a JSON config; keys left out keep their defaults.
    pub fn load_from_json(path: &Path) -> Result<Self, DashboardError> {
        if !path.exists() {
            return Err(DashboardError::MissingInput(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn master_path(&self) -> PathBuf {
        self.data_dir.join(&self.master_file)
    }

    pub fn scenario_path(&self, scenario: &ScenarioFile) -> PathBuf {
        self.data_dir.join(&scenario.file)
    }

    pub fn fuel_color(&self, family: FuelFamily) -> &str {
        self.fuel_colors
            .get(&family)
            .map(String::as_str)
            .unwrap_or_else(|| family.default_color())
    }

    /// Applies `FAMILY=#RRGGBB` overrides from the command line.
    pub fn apply_color_overrides(&mut self, overrides: &[String]) -> Result<(), DashboardError> {
        for entry in overrides {
            let (family, color) = entry.split_once('=').ok_or_else(|| {
                DashboardError::InvalidLayout(format!("Color override must be FAMILY=#RRGGBB, got {}", entry))
            })?;
            let family: FuelFamily = family.parse().map_err(DashboardError::InvalidLayout)?;
            if crate::render::colors::parse_hex(color).is_none() {
                return Err(DashboardError::InvalidLayout(format!("Invalid hex color: {}", color)));
            }
            self.fuel_colors.insert(family, color.trim().to_string());
        }
        Ok(())
    }
}
