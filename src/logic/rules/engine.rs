use super::{
    alerts::{FungalRiskRule, HeatAlertRule, HeavyRainRule, StrongWindRule},
    irrigation::{DryAirRule, IrrigationNeededRule, ReduceIrrigationRule},
    Rule,
};
use crate::models::{Advisory, WeatherSnapshot};

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HeatAlertRule),
            Box::new(HeavyRainRule),
            Box::new(StrongWindRule),
            Box::new(FungalRiskRule),
            Box::new(IrrigationNeededRule),
            Box::new(DryAirRule),
            Box::new(ReduceIrrigationRule),
        ];

        Self { rules }
    }

    /// All advisories for the snapshot, alerts before irrigation hints.
    pub fn evaluate(&self, weather: &WeatherSnapshot) -> Vec<Advisory> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(weather))
            .collect()
    }

    pub fn evaluate_rule(&self, rule_id: &str, weather: &WeatherSnapshot) -> Option<Advisory> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(weather))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::calm;
    use super::*;

    #[test]
    fn lists_rules_in_order() {
        let engine = RulesEngine::new();
        let ids: Vec<&str> = engine.list_rules().iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            [
                "heat_alert",
                "heavy_rain",
                "strong_wind",
                "fungal_risk",
                "irrigation_needed",
                "dry_air",
                "reduce_irrigation"
            ]
        );
    }

    #[test]
    fn stormy_day_raises_alerts_then_irrigation_hint() {
        let mut w = calm();
        w.rainfall_mm = 75.0;
        w.wind_speed = 40.0;
        w.humidity_pct = 92.0;

        let ids: Vec<String> = RulesEngine::new()
            .evaluate(&w)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(
            ids,
            ["heavy_rain", "strong_wind", "fungal_risk", "reduce_irrigation"]
        );
    }

    #[test]
    fn evaluate_single_rule() {
        let engine = RulesEngine::new();
        let mut w = calm();
        assert!(engine.evaluate_rule("heat_alert", &w).is_none());
        w.temperature_c = 43.0;
        assert!(engine.evaluate_rule("heat_alert", &w).is_some());
        assert!(engine.evaluate_rule("no_such_rule", &w).is_none());
    }

    #[test]
    fn mock_weather_is_quiet() {
        let w = crate::datasources::mock::mock_weather(
            chrono::NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        );
        assert!(RulesEngine::new().evaluate(&w).is_empty());
    }
}
