use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryCategory {
    HeatAlert,
    HeavyRain,
    StrongWind,
    FungalRisk,
    Irrigation,
}

impl AdvisoryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryCategory::HeatAlert => "Heat",
            AdvisoryCategory::HeavyRain => "Heavy Rain",
            AdvisoryCategory::StrongWind => "Wind",
            AdvisoryCategory::FungalRisk => "Fungal Risk",
            AdvisoryCategory::Irrigation => "Irrigation",
        }
    }

    pub fn is_alert(&self) -> bool {
        !matches!(self, AdvisoryCategory::Irrigation)
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AdvisoryCategory::HeatAlert => Color::Red,
            AdvisoryCategory::HeavyRain => Color::LightBlue,
            AdvisoryCategory::StrongWind => Color::Cyan,
            AdvisoryCategory::FungalRisk => Color::Magenta,
            AdvisoryCategory::Irrigation => Color::Blue,
        }
    }
}

impl std::fmt::Display for AdvisoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Advisory,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Advisory => "Advisory",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Severity::Info => Color::Gray,
            Severity::Advisory => Color::Blue,
            Severity::Warning => Color::Yellow,
            Severity::Critical => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Advisory => "→",
            Severity::Warning => "⚠",
            Severity::Critical => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: String,
}

/// A weather alert or irrigation hint derived from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub id: String,
    pub category: AdvisoryCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub data_points: Vec<DataPoint>,
    pub suggested_action: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Advisory {
    pub fn new(
        id: impl Into<String>,
        category: AdvisoryCategory,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            severity,
            title: title.into(),
            description: description.into(),
            data_points: Vec::new(),
            suggested_action: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_data_point(mut self, label: &str, value: impl std::fmt::Display) -> Self {
        self.data_points.push(DataPoint {
            label: label.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = Some(action.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_data_points() {
        let a = Advisory::new(
            "heat",
            AdvisoryCategory::HeatAlert,
            Severity::Warning,
            "High temperature alert",
            "Temperature above 40°C",
        )
        .with_data_point("Temperature", "42.0°C")
        .with_action("Avoid field work during peak hours");

        assert_eq!(a.data_points.len(), 1);
        assert_eq!(a.data_points[0].value, "42.0°C");
        assert!(a.suggested_action.is_some());
        assert!(a.category.is_alert());
        assert!(!AdvisoryCategory::Irrigation.is_alert());
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Advisory);
        assert!(Severity::Advisory > Severity::Info);
    }
}
