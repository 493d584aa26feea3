use std::path::Path;
use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::config::constants::{PROSPECTIVE_MAX_YEAR, YEAR_COLUMN};
use crate::config::dashboard_config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::scenario_series::ScenarioSeries;
use crate::utils::logging::{self, FileIOType, OperationCategory};

fn parse_value(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Loads one scenario CSV, keeping rows up to and including 2050.
///
/// Rows whose Year is missing or not numeric are dropped along with later years.
pub fn load_scenario_csv(path: &Path, name: &str) -> Result<ScenarioSeries, DashboardError> {
    if !path.exists() {
        return Err(DashboardError::MissingInput(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let year_index = headers
        .iter()
        .position(|h| h == YEAR_COLUMN)
        .ok_or_else(|| DashboardError::InvalidLayout(format!("{} has no {} column", path.display(), YEAR_COLUMN)))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != year_index)
        .map(|(_, h)| h.clone())
        .collect();

    let mut years = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); columns.len()];

    for result in reader.records() {
        let record = result?;
        let year = match record.get(year_index).and_then(parse_value) {
            Some(year) if year <= PROSPECTIVE_MAX_YEAR as f64 => year as i32,
            _ => continue,
        };
        years.push(year);

        let mut column = 0;
        for index in 0..headers.len() {
            if index == year_index {
                continue;
            }
            values[column].push(record.get(index).and_then(parse_value));
            column += 1;
        }
    }

    Ok(ScenarioSeries {
        name: name.to_string(),
        years,
        columns,
        values,
    })
}

/// Loads every configured scenario; missing files are warned about and skipped.
pub fn load_scenarios(config: &DashboardConfig) -> Result<(Vec<ScenarioSeries>, Vec<String>), DashboardError> {
    let _timing = logging::start_timing("load_scenarios",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });

    let mut loaded = Vec::new();
    let mut warnings = Vec::new();

    for scenario in &config.scenario_files {
        let path = config.scenario_path(scenario);
        match load_scenario_csv(&path, &scenario.name) {
            Ok(series) => {
                info!(scenario = %scenario.name, years = series.years.len(), "loaded scenario");
                loaded.push(series);
            }
            Err(DashboardError::MissingInput(_)) => {
                let message = format!("Could not find `{}`. Skipped.", scenario.file);
                warn!("{}", message);
                warnings.push(message);
            }
            Err(e) => return Err(e),
        }
    }

    Ok((loaded, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_years_after_2050_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Middle.csv");
        fs::write(&path, "Year,STL1,PTL1\n2020,3.1,2.0\n2050,1.1,x\n2060,0.5,0.4\n,9,9\n").unwrap();

        let series = load_scenario_csv(&path, "Middle").unwrap();
        assert_eq!(series.years, vec![2020, 2050]);
        assert_eq!(series.columns, vec!["STL1".to_string(), "PTL1".to_string()]);
        assert_eq!(series.column("PTL1").unwrap(), &[Some(2.0), None]);
    }

    #[test]
    fn test_missing_scenarios_are_skipped_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Optimistic.csv"), "Year,HEFA1\n2020,1.0\n").unwrap();

        let config = DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        let (loaded, warnings) = load_scenarios(&config).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Optimistic");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Middle.csv"));
    }

    #[test]
    fn test_year_column_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Pessimistic.csv");
        fs::write(&path, "Jahr,STL1\n2020,1\n").unwrap();
        assert!(matches!(load_scenario_csv(&path, "Pessimistic"), Err(DashboardError::InvalidLayout(_))));
    }
}
