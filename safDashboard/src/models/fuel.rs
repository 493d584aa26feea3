use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// SAF production pathway families, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelFamily {
    #[serde(rename = "STL")]
    Stl,
    #[serde(rename = "PTL")]
    Ptl,
    #[serde(rename = "PBTL")]
    Pbtl,
    #[serde(rename = "BTL")]
    Btl,
    #[serde(rename = "HEFA")]
    Hefa,
}

impl FuelFamily {
    pub const ALL: [FuelFamily; 5] = [
        FuelFamily::Stl,
        FuelFamily::Ptl,
        FuelFamily::Pbtl,
        FuelFamily::Btl,
        FuelFamily::Hefa,
    ];

    /// Code as it appears in the Fuel column of the results sheet.
    pub fn code(&self) -> &'static str {
        match self {
            FuelFamily::Stl => "STL",
            FuelFamily::Ptl => "PTL",
            FuelFamily::Pbtl => "PBTL",
            FuelFamily::Btl => "BTL",
            FuelFamily::Hefa => "HEFA",
        }
    }

    pub fn display_rank(&self) -> usize {
        FuelFamily::ALL.iter().position(|f| f == self).unwrap_or(FuelFamily::ALL.len())
    }

    /// Bar colour used on the overview page unless overridden.
    pub fn default_color(&self) -> &'static str {
        match self {
            FuelFamily::Stl => "#FF0000",
            FuelFamily::Ptl => "#0000FF",
            FuelFamily::Pbtl => "#90EE90",
            FuelFamily::Btl => "#008000",
            FuelFamily::Hefa => "#FFA900",
        }
    }

    /// Panel title colour on the prospective grid.
    pub fn grid_title_color(&self) -> &'static str {
        match self {
            FuelFamily::Stl => "red",
            FuelFamily::Ptl => "blue",
            FuelFamily::Pbtl => "limegreen",
            FuelFamily::Btl => "green",
            FuelFamily::Hefa => "darkorange",
        }
    }

    /// Classifies a free-form column label such as "PBTL3" by substring.
    ///
    /// PBTL is checked before BTL because every PBTL label also contains BTL.
    pub fn from_label(label: &str) -> Option<FuelFamily> {
        if label.contains("STL") {
            Some(FuelFamily::Stl)
        } else if label.contains("PTL") {
            Some(FuelFamily::Ptl)
        } else if label.contains("PBTL") {
            Some(FuelFamily::Pbtl)
        } else if label.contains("BTL") {
            Some(FuelFamily::Btl)
        } else if label.contains("HEFA") {
            Some(FuelFamily::Hefa)
        } else {
            None
        }
    }

    /// Only these two families receive the optional CO₂ correction.
    pub fn co2_correction(&self) -> Option<f64> {
        use crate::config::constants::{PTL_CO2_CORRECTION, STL_CO2_CORRECTION};
        match self {
            FuelFamily::Stl => Some(STL_CO2_CORRECTION),
            FuelFamily::Ptl => Some(PTL_CO2_CORRECTION),
            _ => None,
        }
    }
}

impl FromStr for FuelFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STL" => Ok(FuelFamily::Stl),
            "PTL" => Ok(FuelFamily::Ptl),
            "PBTL" => Ok(FuelFamily::Pbtl),
            "BTL" => Ok(FuelFamily::Btl),
            "HEFA" => Ok(FuelFamily::Hefa),
            _ => Err(format!("Unknown fuel family: {}", s)),
        }
    }
}

impl fmt::Display for FuelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_prefers_pbtl_over_btl() {
        assert_eq!(FuelFamily::from_label("PBTL2"), Some(FuelFamily::Pbtl));
        assert_eq!(FuelFamily::from_label("BTL"), Some(FuelFamily::Btl));
        assert_eq!(FuelFamily::from_label("HEFA4"), Some(FuelFamily::Hefa));
        assert_eq!(FuelFamily::from_label("Kerosene"), None);
    }

    #[test]
    fn test_only_stl_and_ptl_are_corrected() {
        assert_eq!(FuelFamily::Stl.co2_correction(), Some(7.4));
        assert_eq!(FuelFamily::Ptl.co2_correction(), Some(6.34));
        assert!(FuelFamily::Pbtl.co2_correction().is_none());
        assert!(FuelFamily::Btl.co2_correction().is_none());
        assert!(FuelFamily::Hefa.co2_correction().is_none());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("hefa".parse::<FuelFamily>(), Ok(FuelFamily::Hefa));
        assert!("jet".parse::<FuelFamily>().is_err());
    }
}
