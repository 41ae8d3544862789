//! Extreme-weather alerts.
//!
//! Each rule fires on a single current reading crossing a fixed threshold and
//! escalates to critical well past it.

use super::Rule;
use crate::models::{Advisory, AdvisoryCategory, Severity, WeatherSnapshot};

const HEAT_THRESHOLD_C: f64 = 40.0;
const EXTREME_HEAT_C: f64 = 45.0;
const HEAVY_RAIN_MM: f64 = 50.0;
const EXTREME_RAIN_MM: f64 = 100.0;
const STRONG_WIND: f64 = 30.0;
const GALE_WIND: f64 = 50.0;
const HUMID_PCT: f64 = 80.0;

/// Temperature above 40°C
pub struct HeatAlertRule;

impl Rule for HeatAlertRule {
    fn id(&self) -> &'static str {
        "heat_alert"
    }

    fn name(&self) -> &'static str {
        "High Temperature"
    }

    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory> {
        let temp = weather.temperature_c;
        if !(temp > HEAT_THRESHOLD_C) {
            return None;
        }

        let severity = if temp > EXTREME_HEAT_C {
            Severity::Critical
        } else {
            Severity::Warning
        };

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::HeatAlert,
                severity,
                "High temperature alert",
                format!("Temperature has reached {:.1}°C.", temp),
            )
            .with_data_point("Temperature", format!("{:.1}°C", temp))
            .with_action("Avoid field work during peak hours"),
        )
    }
}

/// Rainfall above 50mm
pub struct HeavyRainRule;

impl Rule for HeavyRainRule {
    fn id(&self) -> &'static str {
        "heavy_rain"
    }

    fn name(&self) -> &'static str {
        "Heavy Rainfall"
    }

    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory> {
        let rain = weather.rainfall_mm;
        if !(rain > HEAVY_RAIN_MM) {
            return None;
        }

        let severity = if rain > EXTREME_RAIN_MM {
            Severity::Critical
        } else {
            Severity::Warning
        };

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::HeavyRain,
                severity,
                "Heavy rainfall expected",
                format!("{:.0}mm of rain recorded.", rain),
            )
            .with_data_point("Rainfall", format!("{:.1}mm", rain))
            .with_action("Ensure proper drainage"),
        )
    }
}

/// Wind above 30
pub struct StrongWindRule;

impl Rule for StrongWindRule {
    fn id(&self) -> &'static str {
        "strong_wind"
    }

    fn name(&self) -> &'static str {
        "Strong Wind"
    }

    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory> {
        let wind = weather.wind_speed;
        if !(wind > STRONG_WIND) {
            return None;
        }

        let severity = if wind > GALE_WIND {
            Severity::Critical
        } else {
            Severity::Warning
        };

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::StrongWind,
                severity,
                "Strong winds expected",
                format!("Wind speed at {:.0}.", wind),
            )
            .with_data_point("Wind", format!("{:.1}", wind))
            .with_action("Secure farm equipment"),
        )
    }
}

/// Humidity above 80% favours fungal disease
pub struct FungalRiskRule;

impl Rule for FungalRiskRule {
    fn id(&self) -> &'static str {
        "fungal_risk"
    }

    fn name(&self) -> &'static str {
        "High Humidity"
    }

    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory> {
        let humidity = weather.humidity_pct;
        if !(humidity > HUMID_PCT) {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::FungalRisk,
                Severity::Advisory,
                "High humidity",
                "Risk of fungal diseases",
            )
            .with_data_point("Humidity", format!("{:.0}%", humidity))
            .with_action("Scout for leaf spot and blight; avoid overhead irrigation"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::calm;
    use super::*;

    #[test]
    fn calm_weather_triggers_nothing() {
        let w = calm();
        assert!(HeatAlertRule.evaluate(&w).is_none());
        assert!(HeavyRainRule.evaluate(&w).is_none());
        assert!(StrongWindRule.evaluate(&w).is_none());
        assert!(FungalRiskRule.evaluate(&w).is_none());
    }

    #[test]
    fn heat_threshold_is_exclusive() {
        let mut w = calm();
        w.temperature_c = 40.0;
        assert!(HeatAlertRule.evaluate(&w).is_none());

        w.temperature_c = 41.5;
        let a = HeatAlertRule.evaluate(&w).unwrap();
        assert_eq!(a.severity, Severity::Warning);
        assert_eq!(a.suggested_action.as_deref(), Some("Avoid field work during peak hours"));

        w.temperature_c = 46.0;
        assert_eq!(HeatAlertRule.evaluate(&w).unwrap().severity, Severity::Critical);
    }

    #[test]
    fn heavy_rain_escalates() {
        let mut w = calm();
        w.rainfall_mm = 60.0;
        assert_eq!(HeavyRainRule.evaluate(&w).unwrap().severity, Severity::Warning);
        w.rainfall_mm = 120.0;
        assert_eq!(HeavyRainRule.evaluate(&w).unwrap().severity, Severity::Critical);
    }

    #[test]
    fn strong_wind() {
        let mut w = calm();
        w.wind_speed = 35.0;
        let a = StrongWindRule.evaluate(&w).unwrap();
        assert_eq!(a.category, AdvisoryCategory::StrongWind);
        assert_eq!(a.title, "Strong winds expected");
    }

    #[test]
    fn humidity_flags_fungal_risk() {
        let mut w = calm();
        w.humidity_pct = 85.0;
        let a = FungalRiskRule.evaluate(&w).unwrap();
        assert_eq!(a.category, AdvisoryCategory::FungalRisk);
        assert_eq!(a.data_points[0].value, "85%");
    }

    #[test]
    fn nan_readings_never_alert() {
        let mut w = calm();
        w.temperature_c = f64::NAN;
        w.rainfall_mm = f64::NAN;
        assert!(HeatAlertRule.evaluate(&w).is_none());
        assert!(HeavyRainRule.evaluate(&w).is_none());
    }
}
