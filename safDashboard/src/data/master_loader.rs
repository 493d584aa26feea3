use std::path::Path;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::config::constants::{
    FIRST_IMPACT_COLUMN, FUEL_COLUMN, PROCESS_COLUMN, SCENARIO_COLUMN, SYSTEM_COLUMN,
};
use crate::error::DashboardError;
use crate::models::impact_record::{ImpactRecord, ImpactTable};
use crate::models::life_cycle_stage::LifeCycleStage;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// A spreadsheet cell before type coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric coercion; anything unparsable becomes missing.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Empty => None,
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| !v.is_nan())
    }

    /// Integer coercion for scenario ids; non-integral numbers become missing.
    pub fn to_integer(&self) -> Option<i64> {
        self.to_number()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    }

    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", *v as i64),
            Cell::Number(v) => format!("{}", v),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Data::String(s) => Cell::Text(s.clone()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            _ => Cell::Empty,
        }
    }
}

/// Header row plus data rows of the first sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        if rows.is_empty() {
            return RawSheet::default();
        }
        let header_cells = rows.remove(0);
        let headers = header_cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let name = cell.to_text();
                if name.is_empty() {
                    format!("Unnamed: {}", index)
                } else {
                    name
                }
            })
            .collect();
        rows.retain(|row| !row.iter().all(Cell::is_empty));
        RawSheet { headers, rows }
    }
}

fn read_workbook(path: &Path) -> Result<RawSheet, DashboardError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DashboardError::InvalidLayout(format!("{} has no sheets", path.display())))??;

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();
    Ok(RawSheet::from_rows(rows))
}

fn read_delimited(path: &Path) -> Result<RawSheet, DashboardError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| {
                let trimmed = field.trim();
                if trimmed.is_empty() {
                    Cell::Empty
                } else if let Ok(number) = trimmed.parse::<f64>() {
                    Cell::Number(number)
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(RawSheet::from_rows(rows))
}

/// Reads the first sheet of a workbook, or a CSV export of it.
pub fn read_sheet(path: &Path) -> Result<RawSheet, DashboardError> {
    if !path.exists() {
        return Err(DashboardError::MissingInput(path.to_path_buf()));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_delimited(path)
    } else {
        read_workbook(path)
    }
}

/// Coerces a raw sheet into typed records.
///
/// Columns 1-4 are System, Fuel, Scenario and Process; every later column is
/// an impact category.
pub fn build_impact_table(sheet: RawSheet) -> Result<ImpactTable, DashboardError> {
    if sheet.headers.len() <= FIRST_IMPACT_COLUMN {
        return Err(DashboardError::InvalidLayout(format!(
            "expected System, Fuel, Scenario, Process and at least one impact column, found {} columns",
            sheet.headers.len()
        )));
    }

    let categories: Vec<String> = sheet.headers[FIRST_IMPACT_COLUMN..].to_vec();
    let empty = Cell::Empty;
    let mut missing_scenarios = 0;
    let mut missing_values = 0;

    let records: Vec<ImpactRecord> = sheet
        .rows
        .iter()
        .map(|row| {
            let cell = |index: usize| row.get(index).unwrap_or(&empty);

            let system = cell(SYSTEM_COLUMN).to_text();
            let scenario = cell(SCENARIO_COLUMN).to_integer();
            if scenario.is_none() {
                missing_scenarios += 1;
            }

            let values: Vec<Option<f64>> = (0..categories.len())
                .map(|offset| {
                    let value = cell(FIRST_IMPACT_COLUMN + offset).to_number();
                    if value.is_none() {
                        missing_values += 1;
                    }
                    value
                })
                .collect();

            ImpactRecord {
                stage: LifeCycleStage::from_system_name(&system),
                system,
                fuel: cell(FUEL_COLUMN).to_text(),
                scenario,
                process: cell(PROCESS_COLUMN).to_text(),
                values,
            }
        })
        .collect();

    if missing_scenarios > 0 {
        warn!(rows = missing_scenarios, "rows with a non-integer scenario id will match no variant");
    }
    if missing_values > 0 {
        debug!(cells = missing_values, "non-numeric impact cells treated as missing");
    }

    Ok(ImpactTable::new(categories, records))
}

pub fn load_impact_table(path: &Path) -> Result<ImpactTable, DashboardError> {
    let _timing = logging::start_timing("load_impact_table",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });

    let sheet = read_sheet(path)?;
    let table = build_impact_table(sheet)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        categories = table.categories().len(),
        "loaded impact results"
    );
    Ok(table)
}
