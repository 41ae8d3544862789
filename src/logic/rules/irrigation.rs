use super::Rule;
use crate::models::{Advisory, AdvisoryCategory, Severity, WeatherSnapshot};

/// Dry and hot: rainfall under 10mm with temperature above 30°C
pub struct IrrigationNeededRule;

impl Rule for IrrigationNeededRule {
    fn id(&self) -> &'static str {
        "irrigation_needed"
    }

    fn name(&self) -> &'static str {
        "Irrigation Needed"
    }

    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory> {
        if !(weather.rainfall_mm < 10.0 && weather.temperature_c > 30.0) {
            return None;
        }

        let severity = if weather.temperature_c > 38.0 {
            Severity::Warning
        } else {
            Severity::Advisory
        };

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::Irrigation,
                severity,
                "Irrigation needed",
                "Low rainfall and high temperature",
            )
            .with_data_point("Rainfall", format!("{:.1}mm", weather.rainfall_mm))
            .with_data_point("Temperature", format!("{:.1}°C", weather.temperature_c))
            .with_action("Irrigate in the early morning or evening to limit evaporation"),
        )
    }
}

/// Humidity under 40%
pub struct DryAirRule;

impl Rule for DryAirRule {
    fn id(&self) -> &'static str {
        "dry_air"
    }

    fn name(&self) -> &'static str {
        "Low Humidity"
    }

    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory> {
        if !(weather.humidity_pct < 40.0) {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::Irrigation,
                Severity::Advisory,
                "Increase irrigation frequency",
                "Low humidity",
            )
            .with_data_point("Humidity", format!("{:.0}%", weather.humidity_pct))
            .with_action("Water more often in smaller amounts"),
        )
    }
}

/// Rainfall above 30mm
pub struct ReduceIrrigationRule;

impl Rule for ReduceIrrigationRule {
    fn id(&self) -> &'static str {
        "reduce_irrigation"
    }

    fn name(&self) -> &'static str {
        "Sufficient Rainfall"
    }

    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory> {
        if !(weather.rainfall_mm > 30.0) {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::Irrigation,
                Severity::Info,
                "Reduce irrigation",
                "Sufficient rainfall received",
            )
            .with_data_point("Rainfall", format!("{:.1}mm", weather.rainfall_mm))
            .with_action("Skip the next scheduled irrigation"),
        )
    }
}
