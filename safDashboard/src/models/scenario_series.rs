use serde::Serialize;

/// One IAM scenario file: a Year column plus one numeric column per fuel variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSeries {
    pub name: String,
    pub years: Vec<i32>,
    pub columns: Vec<String>,
    /// Indexed `[column][row]`, aligned with `years`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl ScenarioSeries {
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|index| self.values[index].as_slice())
    }

    /// (year, value) pairs with missing values dropped.
    pub fn points(&self, name: &str) -> Vec<(i32, f64)> {
        match self.column(name) {
            Some(values) => self
                .years
                .iter()
                .zip(values.iter())
                .filter_map(|(year, value)| value.map(|v| (*year, v)))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_skip_missing_values() {
        let series = ScenarioSeries {
            name: "Middle".to_string(),
            years: vec![2020, 2030, 2040],
            columns: vec!["STL1".to_string()],
            values: vec![vec![Some(2.0), None, Some(1.0)]],
        };
        assert_eq!(series.points("STL1"), vec![(2020, 2.0), (2040, 1.0)]);
        assert!(series.points("PTL1").is_empty());
    }
}
