use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Silty,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Silty => "silty",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clay" => Some(SoilType::Clay),
            "sandy" | "sand" => Some(SoilType::Sandy),
            "loamy" | "loam" => Some(SoilType::Loamy),
            "silty" | "silt" => Some(SoilType::Silty),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Primary macronutrients in ppm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    /// `None` when the sample reported a texture outside the four known classes.
    pub soil_type: Option<SoilType>,
    pub ph: f64,
    pub organic_matter_pct: f64,
    pub nutrients: Nutrients,
    pub moisture_pct: f64,
}

impl Default for SoilSample {
    fn default() -> Self {
        Self {
            soil_type: Some(SoilType::Loamy),
            ph: 6.5,
            organic_matter_pct: 2.1,
            nutrients: Nutrients {
                nitrogen: 45.0,
                phosphorus: 25.0,
                potassium: 180.0,
            },
            moisture_pct: 65.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            HealthStatus::Excellent
        } else if score >= 60 {
            HealthStatus::Good
        } else if score >= 40 {
            HealthStatus::Fair
        } else {
            HealthStatus::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Poor => "Poor",
            HealthStatus::Fair => "Fair",
            HealthStatus::Good => "Good",
            HealthStatus::Excellent => "Excellent",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            HealthStatus::Poor => Color::Red,
            HealthStatus::Fair => Color::Yellow,
            HealthStatus::Good => Color::LightGreen,
            HealthStatus::Excellent => Color::Green,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Points earned by each band of the soil health score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilSubScores {
    pub ph: u32,
    pub organic_matter: u32,
    pub nitrogen: u32,
    pub phosphorus: u32,
    pub potassium: u32,
    pub moisture: u32,
}

impl SoilSubScores {
    pub fn nutrients(&self) -> u32 {
        self.nitrogen + self.phosphorus + self.potassium
    }

    pub fn total(&self) -> u32 {
        self.ph + self.organic_matter + self.nutrients() + self.moisture
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilHealthReport {
    /// 0-100
    pub overall_score: u32,
    pub status: HealthStatus,
    pub sub_scores: SoilSubScores,
    pub recommendations: Vec<String>,
    pub improvements: Vec<String>,
}
