use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Pa,
    Regional,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Pa => "pa",
            Language::Regional => "regional",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Pa => "ਪੰਜਾਬੀ",
            Language::Regional => "क्षेत्रीय",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "hi" | "hindi" => Some(Language::Hi),
            "pa" | "punjabi" => Some(Language::Pa),
            "regional" => Some(Language::Regional),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub state: String,
    pub district: String,
    pub village: String,
    pub coordinates: Coordinates,
}

impl Location {
    pub fn label(&self) -> String {
        [&self.village, &self.district, &self.state]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            state: "Delhi".into(),
            district: "New Delhi".into(),
            village: "Central Delhi".into(),
            coordinates: Coordinates {
                lat: 28.6139,
                lng: 77.2090,
            },
        }
    }
}

/// Locally registered farmer. Stands in for a real account; there are no
/// credentials attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: Location,
    pub language: Language,
    /// Acres
    pub farm_size: f64,
    /// Years
    pub experience: u32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Registration form as entered by the farmer.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub location: Location,
    pub farm_size: f64,
    pub experience: i64,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_str() {
        assert_eq!(Language::from_str("hi"), Some(Language::Hi));
        assert_eq!(Language::from_str("Hindi"), Some(Language::Hi));
        assert_eq!(Language::from_str("EN"), Some(Language::En));
        assert_eq!(Language::from_str("fr"), None);
    }

    #[test]
    fn location_label_skips_empty_parts() {
        let loc = Location {
            state: "Punjab".into(),
            district: "Ludhiana".into(),
            village: String::new(),
            coordinates: Coordinates::default(),
        };
        assert_eq!(loc.label(), "Ludhiana, Punjab");
        assert_eq!(Location::default().label(), "Central Delhi, New Delhi, Delhi");
    }
}
