use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerDose {
    pub name: &'static str,
    pub amount: f64,
    pub unit: &'static str,
    pub timing: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleStep {
    pub when: &'static str,
    pub activity: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerPlan {
    pub doses: Vec<FertilizerDose>,
    /// Rupees
    pub total_cost: u64,
    pub schedule: Vec<ScheduleStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementLevel {
    Basic,
    Moderate,
    Comprehensive,
}

impl ImprovementLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(ImprovementLevel::Basic),
            "moderate" => Some(ImprovementLevel::Moderate),
            "comprehensive" => Some(ImprovementLevel::Comprehensive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementEstimate {
    pub level: ImprovementLevel,
    /// Rupees
    pub cost: u64,
    pub timeline: &'static str,
    pub expected_improvement: &'static str,
}
