use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;
use tracing::info;

use crate::analysis::monetization::MonetizedRow;
use crate::config::constants::MONETIZATION_EXPORT_FILE;
use crate::error::DashboardError;
use crate::models::impact_record::ImpactRecord;
use crate::utils::logging::{self, FileIOType, OperationCategory};

pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
}

impl CsvExporter {
    /// Output goes to `output_dir/<timestamp>` unless `timestamped` is off.
    pub fn new(output_dir: impl AsRef<Path>, timestamped: bool) -> Result<Self, DashboardError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

        let full_path = if timestamped {
            output_dir.as_ref().join(&timestamp)
        } else {
            output_dir.as_ref().to_path_buf()
        };
        std::fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Variant, Fuel, Monetized Cost (€); corrected rows carry the ❌ mark.
    pub fn export_monetization(&self, rows: &[MonetizedRow]) -> Result<PathBuf, DashboardError> {
        let _timing = logging::start_timing("export_monetization",
            OperationCategory::FileIO { subcategory: FileIOType::CsvExport });

        let path = self.path_for(MONETIZATION_EXPORT_FILE);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["Variant", "Fuel", "Monetized Cost (€)"])?;
        for row in rows {
            writer.write_record([row.variant, row.family.code(), row.csv_value().as_str()])?;
        }
        writer.flush()?;

        info!("Exported {} monetized variants to {}", rows.len(), path.display());
        Ok(path)
    }

    /// The loaded sheet with its derived stage column.
    pub fn export_raw_data<'a, I>(
        &self,
        file_name: &str,
        categories: &[String],
        records: I,
    ) -> Result<(PathBuf, usize), DashboardError>
    where
        I: IntoIterator<Item = &'a ImpactRecord>,
    {
        let _timing = logging::start_timing("export_raw_data",
            OperationCategory::FileIO { subcategory: FileIOType::CsvExport });

        let path = self.path_for(file_name);
        let mut writer = csv::Writer::from_path(&path)?;

        let mut header = vec!["System", "Fuel", "Scenario", "Process", "Stage"];
        header.extend(categories.iter().map(String::as_str));
        writer.write_record(&header)?;

        let mut count = 0;
        for record in records {
            let mut row = vec![
                record.system.clone(),
                record.fuel.clone(),
                record.scenario.map(|s| s.to_string()).unwrap_or_default(),
                record.process.clone(),
                record.stage.display_name().to_string(),
            ];
            row.extend(record.values.iter().map(|v| v.map(|v| v.to_string()).unwrap_or_default()));
            writer.write_record(&row)?;
            count += 1;
        }
        writer.flush()?;

        info!("Exported {} rows to {}", count, path.display());
        Ok((path, count))
    }

    /// Pretty-printed JSON document, used for chart options.
    pub fn write_json(&self, file_name: &str, value: &Value) -> Result<PathBuf, DashboardError> {
        let _timing = logging::start_timing("write_json",
            OperationCategory::FileIO { subcategory: FileIOType::ChartSave });

        let path = self.path_for(file_name);
        let mut file = File::create(&path)?;
        serde_json::to_writer_pretty(&mut file, value)?;
        writeln!(file)?;
        Ok(path)
    }
}
