use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    Kg,
    Quintal,
    Tonne,
}

impl PriceUnit {
    pub fn kilograms(&self) -> f64 {
        match self {
            PriceUnit::Kg => 1.0,
            PriceUnit::Quintal => 100.0,
            PriceUnit::Tonne => 1000.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceUnit::Kg => "kg",
            PriceUnit::Quintal => "quintal",
            PriceUnit::Tonne => "tonne",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kg" => Some(PriceUnit::Kg),
            "quintal" => Some(PriceUnit::Quintal),
            "tonne" => Some(PriceUnit::Tonne),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    #[default]
    Stable,
}

impl PriceTrend {
    /// Stored form, as accepted by `from_str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTrend::Up => "up",
            PriceTrend::Down => "down",
            PriceTrend::Stable => "stable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceTrend::Up => "↑ Up",
            PriceTrend::Down => "↓ Down",
            PriceTrend::Stable => "→ Stable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(PriceTrend::Up),
            "down" => Some(PriceTrend::Down),
            "stable" => Some(PriceTrend::Stable),
            _ => None,
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            PriceTrend::Up => Color::Green,
            PriceTrend::Down => Color::Red,
            PriceTrend::Stable => Color::Gray,
        }
    }
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub crop_id: String,
    pub crop_name: String,
    pub price: f64,
    pub unit: PriceUnit,
    pub location: String,
    pub date: NaiveDate,
    pub trend: PriceTrend,
}

impl MarketPrice {
    pub fn price_per_kg(&self) -> f64 {
        self.price / self.unit.kilograms()
    }
}
