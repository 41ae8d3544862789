use super::farmer::Language;
use super::soil::SoilType;
use serde::{Deserialize, Serialize};

/// Indian cropping season a crop is sown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon-sown
    Kharif,
    /// Winter-sown
    Rabi,
    /// Short summer season
    Zaid,
    /// Grown year-round
    All,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
            Season::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif (Monsoon)",
            Season::Rabi => "Rabi (Winter)",
            Season::Zaid => "Zaid (Summer)",
            Season::All => "Year-round",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Some(Season::Kharif),
            "rabi" => Some(Season::Rabi),
            "zaid" => Some(Season::Zaid),
            "all" => Some(Season::All),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

impl WaterRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterRequirement::Low => "low",
            WaterRequirement::Medium => "medium",
            WaterRequirement::High => "high",
        }
    }
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive temperature tolerance in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, temp_c: f64) -> bool {
        temp_c >= self.min && temp_c <= self.max
    }
}

/// Static catalog definition of a crop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crop {
    pub id: &'static str,
    pub name: &'static str,
    pub name_hindi: &'static str,
    pub season: Season,
    pub duration_days: u32,
    pub water_requirement: WaterRequirement,
    pub soil_types: &'static [SoilType],
    pub temperature_range: TemperatureRange,
    /// Baseline yield, kg per acre
    pub yield_kg: f64,
    /// Baseline market price, ₹ per kg
    pub market_price: f64,
}

impl Crop {
    pub fn suits_soil(&self, soil_type: SoilType) -> bool {
        self.soil_types.contains(&soil_type)
    }

    pub fn display_name(&self, language: Language) -> &'static str {
        match language {
            Language::Hi => self.name_hindi,
            _ => self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_parse_is_case_insensitive() {
        assert_eq!(Season::parse("kharif"), Some(Season::Kharif));
        assert_eq!(Season::parse("Rabi"), Some(Season::Rabi));
        assert_eq!(Season::parse(" ZAID "), Some(Season::Zaid));
        assert_eq!(Season::parse("all"), Some(Season::All));
    }

    #[test]
    fn season_parse_rejects_typos() {
        assert_eq!(Season::parse("khariff"), None);
        assert_eq!(Season::parse(""), None);
    }

    #[test]
    fn temperature_range_is_inclusive() {
        let range = TemperatureRange::new(20.0, 35.0);
        assert!(range.contains(20.0));
        assert!(range.contains(35.0));
        assert!(!range.contains(35.01));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn display_name_follows_language() {
        let crop = Crop {
            id: "rice",
            name: "Rice",
            name_hindi: "चावल",
            season: Season::Kharif,
            duration_days: 120,
            water_requirement: WaterRequirement::High,
            soil_types: &[SoilType::Clay, SoilType::Loamy],
            temperature_range: TemperatureRange::new(20.0, 35.0),
            yield_kg: 3000.0,
            market_price: 25.0,
        };
        assert_eq!(crop.display_name(Language::En), "Rice");
        assert_eq!(crop.display_name(Language::Hi), "चावल");
        assert!(crop.suits_soil(SoilType::Loamy));
        assert!(!crop.suits_soil(SoilType::Sandy));
    }
}
