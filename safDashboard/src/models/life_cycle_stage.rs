use std::fmt;
use serde::{Deserialize, Serialize};

/// Life-cycle stage derived from the numbering embedded in a system name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifeCycleStage {
    Construction,
    RawMaterial,
    Pretreatment,
    Conversion,
    Transportation,
    Other,
}

impl LifeCycleStage {
    /// Stack order on the contribution chart.
    pub const ORDERED: [LifeCycleStage; 6] = [
        LifeCycleStage::Construction,
        LifeCycleStage::RawMaterial,
        LifeCycleStage::Pretreatment,
        LifeCycleStage::Conversion,
        LifeCycleStage::Transportation,
        LifeCycleStage::Other,
    ];

    /// First matching marker wins, so "1." beats a later "2." in the same name.
    pub fn from_system_name(system_name: &str) -> Self {
        if system_name.contains("1.") {
            LifeCycleStage::Construction
        } else if system_name.contains("2.") {
            LifeCycleStage::RawMaterial
        } else if system_name.contains("3.") {
            LifeCycleStage::Pretreatment
        } else if system_name.contains("4.") {
            LifeCycleStage::Conversion
        } else if system_name.contains("5.") {
            LifeCycleStage::Transportation
        } else {
            LifeCycleStage::Other
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            LifeCycleStage::Construction => "construction",
            LifeCycleStage::RawMaterial => "rawmaterial",
            LifeCycleStage::Pretreatment => "pretreatment",
            LifeCycleStage::Conversion => "conversion",
            LifeCycleStage::Transportation => "transportation",
            LifeCycleStage::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LifeCycleStage::Construction => "1. Construction",
            LifeCycleStage::RawMaterial => "2. Raw material acquisition",
            LifeCycleStage::Pretreatment => "3. Pretreatment",
            LifeCycleStage::Conversion => "4. Conversion",
            LifeCycleStage::Transportation => "5. Transportation",
            LifeCycleStage::Other => "other",
        }
    }

    pub fn color(&self) -> &'static str {
        use crate::config::constants::CONTRIBUTION_COLORS;
        let index = LifeCycleStage::ORDERED.iter().position(|s| s == self).unwrap_or(0);
        CONTRIBUTION_COLORS[index]
    }
}

impl fmt::Display for LifeCycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_from_system_name() {
        assert_eq!(LifeCycleStage::from_system_name("STL 1. Plant construction"), LifeCycleStage::Construction);
        assert_eq!(LifeCycleStage::from_system_name("2. Sugar beet cultivation"), LifeCycleStage::RawMaterial);
        assert_eq!(LifeCycleStage::from_system_name("3. Milling"), LifeCycleStage::Pretreatment);
        assert_eq!(LifeCycleStage::from_system_name("4. Fischer-Tropsch"), LifeCycleStage::Conversion);
        assert_eq!(LifeCycleStage::from_system_name("5. Truck"), LifeCycleStage::Transportation);
        assert_eq!(LifeCycleStage::from_system_name("Electricity mix"), LifeCycleStage::Other);
    }

    #[test]
    fn test_first_marker_wins() {
        // "1." is checked first even though "2." appears earlier in the string
        assert_eq!(LifeCycleStage::from_system_name("2.1. Harvest"), LifeCycleStage::Construction);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(LifeCycleStage::RawMaterial.display_name(), "2. Raw material acquisition");
        assert_eq!(LifeCycleStage::Other.to_string(), "other");
        assert_eq!(LifeCycleStage::Transportation.color(), "#FFA15A");
    }
}
