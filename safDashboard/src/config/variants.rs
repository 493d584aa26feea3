use crate::error::DashboardError;
use crate::models::fuel::FuelFamily;

/// A fuel variant selects the rows of one family whose scenario id is in `scenarios`.
///
/// Scenario 0 holds the shared base processes, so every variant includes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelVariant {
    pub label: &'static str,
    pub family: FuelFamily,
    pub scenarios: &'static [i64],
}

impl FuelVariant {
    const fn new(label: &'static str, family: FuelFamily, scenarios: &'static [i64]) -> Self {
        Self { label, family, scenarios }
    }

    pub fn matches(&self, fuel: &str, scenario: Option<i64>) -> bool {
        fuel == self.family.code()
            && scenario.map_or(false, |id| self.scenarios.contains(&id))
    }
}

/// All sixteen variants in canonical display order.
pub static FUEL_VARIANTS: [FuelVariant; 16] = [
    FuelVariant::new("STL1", FuelFamily::Stl, &[0, 1]),
    FuelVariant::new("STL2", FuelFamily::Stl, &[0, 2]),
    FuelVariant::new("STL3", FuelFamily::Stl, &[0, 3]),
    FuelVariant::new("PTL1", FuelFamily::Ptl, &[0, 1]),
    FuelVariant::new("PTL2", FuelFamily::Ptl, &[0, 2]),
    FuelVariant::new("PTL3", FuelFamily::Ptl, &[0, 3]),
    FuelVariant::new("PTL4", FuelFamily::Ptl, &[0, 4]),
    FuelVariant::new("PBTL1", FuelFamily::Pbtl, &[0, 1]),
    FuelVariant::new("PBTL2", FuelFamily::Pbtl, &[0, 2]),
    FuelVariant::new("PBTL3", FuelFamily::Pbtl, &[0, 3]),
    FuelVariant::new("PBTL4", FuelFamily::Pbtl, &[0, 4]),
    FuelVariant::new("BTL", FuelFamily::Btl, &[0]),
    FuelVariant::new("HEFA1", FuelFamily::Hefa, &[0, 1]),
    FuelVariant::new("HEFA2", FuelFamily::Hefa, &[0, 2]),
    FuelVariant::new("HEFA3", FuelFamily::Hefa, &[0, 3]),
    FuelVariant::new("HEFA4", FuelFamily::Hefa, &[0, 4]),
];

pub fn find_variant(label: &str) -> Result<&'static FuelVariant, DashboardError> {
    FUEL_VARIANTS
        .iter()
        .find(|v| v.label.eq_ignore_ascii_case(label.trim()))
        .ok_or_else(|| DashboardError::UnknownVariant(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_includes_base_scenario() {
        for variant in FUEL_VARIANTS.iter() {
            assert!(variant.scenarios.contains(&0), "{} lacks scenario 0", variant.label);
        }
    }

    #[test]
    fn test_variant_counts_per_family() {
        let count = |family| FUEL_VARIANTS.iter().filter(|v| v.family == family).count();
        assert_eq!(count(FuelFamily::Stl), 3);
        assert_eq!(count(FuelFamily::Ptl), 4);
        assert_eq!(count(FuelFamily::Pbtl), 4);
        assert_eq!(count(FuelFamily::Btl), 1);
        assert_eq!(count(FuelFamily::Hefa), 4);
    }

    #[test]
    fn test_matches_requires_family_and_scenario() {
        let ptl2 = find_variant("ptl2").unwrap();
        assert!(ptl2.matches("PTL", Some(0)));
        assert!(ptl2.matches("PTL", Some(2)));
        assert!(!ptl2.matches("PTL", Some(3)));
        assert!(!ptl2.matches("PBTL", Some(2)));
        assert!(!ptl2.matches("PTL", None));
    }

    #[test]
    fn test_unknown_variant() {
        assert!(matches!(find_variant("STL9"), Err(DashboardError::UnknownVariant(_))));
        assert_eq!(find_variant(" hefa4 ").unwrap().label, "HEFA4");
    }
}
