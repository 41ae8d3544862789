use super::crop::Crop;
use chrono::NaiveDate;
use serde::Serialize;

/// Credits earned by each scoring factor, in hundredths of a point.
///
/// Integer accumulation keeps sums such as 0.30 + 0.20 + 0.10 exactly on the
/// acceptance boundary instead of drifting above or below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub soil: u32,
    pub temperature: u32,
    pub season: u32,
    pub water: u32,
    pub market: u32,
}

impl ScoreBreakdown {
    pub fn total_points(&self) -> u32 {
        self.soil + self.temperature + self.season + self.water + self.market
    }

    /// Suitability in [0, 1].
    pub fn score(&self) -> f64 {
        self.total_points() as f64 / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRecommendation {
    pub crop: Crop,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    pub sowing_date: NaiveDate,
    pub harvest_date: NaiveDate,
    /// kg per acre, adjusted for conditions
    pub expected_yield_kg: u64,
    /// Gross revenue: `expected_yield_kg × market_price × farm_size`. No input
    /// costs are subtracted despite the name.
    pub estimated_profit: f64,
}

impl CropRecommendation {
    pub fn score_percent(&self) -> u32 {
        self.breakdown.total_points()
    }

    pub fn growing_days(&self) -> i64 {
        (self.harvest_date - self.sowing_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_sums_to_exact_hundredths() {
        let b = ScoreBreakdown {
            soil: 30,
            temperature: 0,
            season: 20,
            water: 0,
            market: 10,
        };
        assert_eq!(b.total_points(), 60);
        assert_eq!(b.score(), 0.6);
    }

    #[test]
    fn full_breakdown_is_one() {
        let b = ScoreBreakdown {
            soil: 30,
            temperature: 25,
            season: 20,
            water: 15,
            market: 10,
        };
        assert_eq!(b.score(), 1.0);
    }
}
