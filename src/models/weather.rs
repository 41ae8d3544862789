use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a weather snapshot came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSource {
    OpenWeatherMap,
    Cached,
    #[default]
    Mock,
}

impl WeatherSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::OpenWeatherMap => "OpenWeatherMap",
            WeatherSource::Cached => "Cached",
            WeatherSource::Mock => "Mock",
        }
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current conditions plus a short daily forecast. Units are metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub wind_speed: f64,
    pub pressure_hpa: f64,
    pub forecast: Vec<DailyForecast>,
    pub fetched_at: DateTime<Utc>,
    pub source: WeatherSource,
}

impl WeatherSnapshot {
    /// Mean of the current temperature and the first forecast day's high.
    /// NaN when the forecast is empty, so range checks against it fail.
    pub fn near_term_avg_temp(&self) -> f64 {
        match self.forecast.first() {
            Some(day) => (self.temperature_c + day.temp_max_c) / 2.0,
            None => f64::NAN,
        }
    }

    pub fn total_forecast_rain(&self) -> f64 {
        self.forecast.iter().map(|d| d.rainfall_mm).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    #[default]
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherCondition {
    /// Map an OpenWeatherMap condition code.
    pub fn from_owm_id(id: u32) -> Self {
        match id {
            200..=232 => WeatherCondition::Stormy,
            300..=321 | 500..=531 => WeatherCondition::Rainy,
            800 => WeatherCondition::Sunny,
            _ => WeatherCondition::Cloudy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Stormy => "Stormy",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "☀",
            WeatherCondition::Cloudy => "☁",
            WeatherCondition::Rainy => "🌧",
            WeatherCondition::Stormy => "⛈",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
