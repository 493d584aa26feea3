use serde::Serialize;

use crate::config::variants::FuelVariant;
use crate::error::DashboardError;
use crate::models::life_cycle_stage::LifeCycleStage;

/// One row of the results sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactRecord {
    pub system: String,
    pub fuel: String,
    pub scenario: Option<i64>,
    pub process: String,
    pub stage: LifeCycleStage,
    /// One entry per impact category, `None` where the cell was not numeric.
    pub values: Vec<Option<f64>>,
}

impl ImpactRecord {
    pub fn value(&self, column: usize) -> Option<f64> {
        self.values.get(column).copied().flatten()
    }
}

/// The loaded results sheet: impact category names plus their rows.
#[derive(Debug, Clone, Default)]
pub struct ImpactTable {
    categories: Vec<String>,
    records: Vec<ImpactRecord>,
}

impl ImpactTable {
    pub fn new(categories: Vec<String>, records: Vec<ImpactRecord>) -> Self {
        Self { categories, records }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn records(&self) -> &[ImpactRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    pub fn require_column(&self, category: &str) -> Result<usize, DashboardError> {
        self.column_index(category)
            .ok_or_else(|| DashboardError::UnknownImpactCategory(category.to_string()))
    }

    /// Rows belonging to a fuel variant.
    pub fn variant_rows<'a>(
        &'a self,
        variant: &'a FuelVariant,
    ) -> impl Iterator<Item = &'a ImpactRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| variant.matches(&record.fuel, record.scenario))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn record(fuel: &str, scenario: i64, system: &str, process: &str, values: Vec<Option<f64>>) -> ImpactRecord {
        ImpactRecord {
            system: system.to_string(),
            fuel: fuel.to_string(),
            scenario: Some(scenario),
            process: process.to_string(),
            stage: LifeCycleStage::from_system_name(system),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;
    use crate::config::variants::find_variant;

    #[test]
    fn test_variant_rows_filter_by_family_and_scenario() {
        let table = ImpactTable::new(
            vec!["GWP".to_string()],
            vec![
                record("HEFA", 0, "1. Plant", "steel", vec![Some(1.0)]),
                record("HEFA", 3, "2. Oil", "palm", vec![Some(2.0)]),
                record("HEFA", 4, "2. Oil", "tallow", vec![Some(4.0)]),
                record("PTL", 0, "1. Plant", "steel", vec![Some(8.0)]),
            ],
        );
        let hefa3 = find_variant("HEFA3").unwrap();
        let processes: Vec<_> = table.variant_rows(hefa3).map(|r| r.process.as_str()).collect();
        assert_eq!(processes, vec!["steel", "palm"]);
        assert_eq!(table.column_index("GWP"), Some(0));
        assert!(table.require_column("Land").is_err());
    }
}
