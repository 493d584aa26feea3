use std::fmt;
use std::str::FromStr;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which column of the (low, central, high) factor triple to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum MonetizationTier {
    Low,
    #[default]
    Central,
    High,
}

impl fmt::Display for MonetizationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonetizationTier::Low => write!(f, "Low"),
            MonetizationTier::Central => write!(f, "Central"),
            MonetizationTier::High => write!(f, "High"),
        }
    }
}

impl FromStr for MonetizationTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(MonetizationTier::Low),
            "central" => Ok(MonetizationTier::Central),
            "high" => Ok(MonetizationTier::High),
            _ => Err(format!("Unknown monetization tier: {}", s)),
        }
    }
}

/// €/unit conversion for one impact category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonetizationFactor {
    pub category: &'static str,
    pub low: f64,
    pub central: f64,
    pub high: f64,
    pub color: Option<&'static str>,
}

impl MonetizationFactor {
    pub fn value(&self, tier: MonetizationTier) -> f64 {
        match tier {
            MonetizationTier::Low => self.low,
            MonetizationTier::Central => self.central,
            MonetizationTier::High => self.high,
        }
    }

    pub fn color_or_default(&self) -> &'static str {
        self.color.unwrap_or(crate::config::constants::FALLBACK_CATEGORY_COLOR)
    }
}

pub const CLIMATE_CHANGE_CATEGORY: &str = "Climate change (kg CO₂ eq.)";

pub static MONETIZATION_FACTORS: [MonetizationFactor; 15] = [
    MonetizationFactor { category: CLIMATE_CHANGE_CATEGORY, low: 0.0615, central: 0.1025, high: 0.1936, color: Some("#ff4d4d") },
    MonetizationFactor { category: "Ozone Depletion Potential (kg CFC-11 eq.)", low: 22.8, central: 31.4, high: 127.2, color: Some("#800000") },
    MonetizationFactor { category: "Ionising Radiation – Human Health (kBq U-235 eq.)", low: 0.0008, central: 0.0012, high: 0.0461, color: Some("#800080") },
    MonetizationFactor { category: "Photochemical Ozone Creation Potential (kg NMVOC eq.)", low: 0.87, central: 1.19, high: 1.90, color: Some("#ffa500") },
    MonetizationFactor { category: "Particulate Matter Formation (Disease incidence)", low: 661_974.0, central: 784_126.0, high: 1_204_600.0, color: Some("#808000") },
    MonetizationFactor { category: "Human Toxicity – Non-Carcinogenic (CTUh)", low: 30_211.0, central: 163_447.0, high: 755_270.0, color: Some("#8b4513") },
    MonetizationFactor { category: "Human Toxicity – Carcinogenic (CTUh)", low: 174_324.0, central: 902_616.0, high: 2_789_181.0, color: Some("#a52a2a") },
    MonetizationFactor { category: "Acidification (mol H⁺ eq.)", low: 0.176, central: 0.344, high: 1.617, color: Some("#ff69b4") },
    MonetizationFactor { category: "Eutrophication Potential – Freshwater (kg P eq.)", low: 0.26, central: 1.92, high: 2.18, color: Some("#32cd32") },
    MonetizationFactor { category: "Eutrophication Potential – Marine (kg N eq.)", low: 3.21, central: 3.21, high: 3.21, color: None },
    MonetizationFactor { category: "Ecotoxicity – Freshwater (CTUe)", low: 2.39e-24, central: 3.82e-05, high: 1.89e-04, color: None },
    MonetizationFactor { category: "Land Use (Pt)", low: 0.000087, central: 0.000175, high: 0.000349, color: Some("#deb887") },
    MonetizationFactor { category: "Water Use (m³ world eq.)", low: 0.00419, central: 0.00499, high: 0.2359, color: Some("#1e90ff") },
    MonetizationFactor { category: "Resource Use – Fossils (MJ)", low: 0.0, central: 0.0013, high: 0.0068, color: Some("#20b2aa") },
    MonetizationFactor { category: "Material resources: metals/minerals (kg Sb eq.)", low: 0.0, central: 1.64, high: 6.53, color: Some("#4682b4") },
];

/// Categories whose sheet column is named too differently for fuzzy matching.
pub const COLUMN_OVERRIDES: [(&str, &str); 1] = [
    ("Resource Use – Fossils (MJ)", "Energy resources: non-renewable (MJ)"),
];

pub fn column_override(category: &str) -> Option<&'static str> {
    COLUMN_OVERRIDES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, column)| *column)
}
