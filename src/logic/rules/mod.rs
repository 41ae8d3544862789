pub mod alerts;
pub mod engine;
pub mod irrigation;

pub use engine::RulesEngine;

use crate::models::{Advisory, WeatherSnapshot};

/// Trait for weather advisory rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return an advisory if conditions are met
    fn evaluate(&self, weather: &WeatherSnapshot) -> Option<Advisory>;
}
