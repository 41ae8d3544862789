//! Crop suitability scoring and recommendation ranking.
//!
//! Each catalog crop earns fixed credits for five independent conditions:
//!
//! | Factor                 | Points | Credited when                                   |
//! |------------------------|--------|-------------------------------------------------|
//! | Soil compatibility     | 30     | sample texture is listed for the crop           |
//! | Temperature fit        | 25     | mean(current, day-1 high) inside crop range     |
//! | Season fit             | 20     | crop season matches, or the crop is year-round  |
//! | Water vs rainfall      | 15     | high > 100mm, medium > 50mm, low < 100mm        |
//! | Market price           | 10     | baseline price above ₹20/kg                     |
//!
//! Crops scoring strictly above 0.6 are returned, best first.

use crate::error::Result;
use crate::logic::validation::validate_scoring_inputs;
use crate::models::{
    Crop, CropRecommendation, Location, ScoreBreakdown, Season, SoilSample, WaterRequirement,
    WeatherSnapshot,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const ACCEPTANCE_THRESHOLD: f64 = 0.6;

pub const SOIL_POINTS: u32 = 30;
pub const TEMPERATURE_POINTS: u32 = 25;
pub const SEASON_POINTS: u32 = 20;
pub const WATER_POINTS: u32 = 15;
pub const MARKET_POINTS: u32 = 10;

const HEAVY_RAIN_MM: f64 = 100.0;
const MODERATE_RAIN_MM: f64 = 50.0;
const PREMIUM_PRICE_PER_KG: f64 = 20.0;
const HIGH_YIELD_KG: f64 = 2000.0;

const KHARIF_LEAD_DAYS: i64 = 30;
const DEFAULT_LEAD_DAYS: i64 = 60;

/// How the scorer treats malformed inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Unknown season, missing soil type, empty forecast and NaN readings
    /// simply earn no credit.
    #[default]
    Legacy,
    /// Such inputs are rejected with a validation error before scoring.
    Strict,
}

impl ScoringMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "legacy" => Some(ScoringMode::Legacy),
            "strict" => Some(ScoringMode::Strict),
            _ => None,
        }
    }
}

pub struct CropScorer<'a> {
    catalog: &'a [Crop],
    mode: ScoringMode,
}

impl<'a> CropScorer<'a> {
    pub fn new(catalog: &'a [Crop], mode: ScoringMode) -> Self {
        Self { catalog, mode }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Score every catalog crop and return those above the acceptance
    /// threshold, sorted by descending score with catalog order kept on ties.
    ///
    /// `location` is accepted for parity with the advisory contract; no factor
    /// reads it yet.
    pub fn recommend(
        &self,
        _location: &Location,
        soil: &SoilSample,
        weather: &WeatherSnapshot,
        farm_size: f64,
        season: &str,
        today: NaiveDate,
    ) -> Result<Vec<CropRecommendation>> {
        let season = match self.mode {
            ScoringMode::Strict => Some(validate_scoring_inputs(soil, weather, farm_size, season)?),
            ScoringMode::Legacy => exact_season(season),
        };

        let mut recommendations: Vec<CropRecommendation> = self
            .catalog
            .iter()
            .filter_map(|crop| {
                let breakdown = score_crop(crop, soil, weather, season);
                let score = breakdown.score();
                if score <= ACCEPTANCE_THRESHOLD {
                    return None;
                }

                let sowing_date = sowing_date(crop, today);
                let harvest_date = sowing_date + Duration::days(crop.duration_days as i64);
                let expected_yield_kg = expected_yield(crop, soil, weather);

                Some(CropRecommendation {
                    crop: crop.clone(),
                    score,
                    breakdown,
                    reasons: recommendation_reasons(crop, soil, weather),
                    sowing_date,
                    harvest_date,
                    expected_yield_kg,
                    estimated_profit: expected_yield_kg as f64 * crop.market_price * farm_size,
                })
            })
            .collect();

        // sort_by is stable, so equal scores keep catalog order
        recommendations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(recommendations)
    }
}

// Legacy matching compares the raw string: "Kharif" or " kharif" is not a season
fn exact_season(season: &str) -> Option<Season> {
    [Season::Kharif, Season::Rabi, Season::Zaid, Season::All]
        .into_iter()
        .find(|s| s.as_str() == season)
}

/// Per-factor credits for one crop. `season` is `None` when the requested
/// season was not recognised; only year-round crops earn season credit then.
pub fn score_crop(
    crop: &Crop,
    soil: &SoilSample,
    weather: &WeatherSnapshot,
    season: Option<Season>,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    if soil.soil_type.is_some_and(|t| crop.suits_soil(t)) {
        breakdown.soil = SOIL_POINTS;
    }

    if crop
        .temperature_range
        .contains(weather.near_term_avg_temp())
    {
        breakdown.temperature = TEMPERATURE_POINTS;
    }

    if crop.season == Season::All || season == Some(crop.season) {
        breakdown.season = SEASON_POINTS;
    }

    if water_matches_rainfall(crop.water_requirement, weather.rainfall_mm) {
        breakdown.water = WATER_POINTS;
    }

    if crop.market_price > PREMIUM_PRICE_PER_KG {
        breakdown.market = MARKET_POINTS;
    }

    breakdown
}

// The low band overlaps the others: a low-water crop is credited for any
// rainfall under 100mm, including the 50-100mm range that also credits medium.
fn water_matches_rainfall(requirement: WaterRequirement, rainfall_mm: f64) -> bool {
    match requirement {
        WaterRequirement::High => rainfall_mm > HEAVY_RAIN_MM,
        WaterRequirement::Medium => rainfall_mm > MODERATE_RAIN_MM,
        WaterRequirement::Low => rainfall_mm < HEAVY_RAIN_MM,
    }
}

/// Kharif crops go in a month out, everything else two months out.
pub fn sowing_date(crop: &Crop, today: NaiveDate) -> NaiveDate {
    let lead = if crop.season == Season::Kharif {
        KHARIF_LEAD_DAYS
    } else {
        DEFAULT_LEAD_DAYS
    };
    today + Duration::days(lead)
}

/// Baseline yield boosted by good organic matter, near-neutral pH and a
/// current temperature inside the crop's range. Rounded to whole kg.
pub fn expected_yield(crop: &Crop, soil: &SoilSample, weather: &WeatherSnapshot) -> u64 {
    let mut multiplier = 1.0;

    if soil.organic_matter_pct > 2.0 {
        multiplier *= 1.2;
    }
    if soil.ph >= 6.0 && soil.ph <= 7.5 {
        multiplier *= 1.1;
    }
    if crop.temperature_range.contains(weather.temperature_c) {
        multiplier *= 1.1;
    }

    // saturating cast: NaN and negatives land on 0
    (crop.yield_kg * multiplier).round() as u64
}

/// Human-readable reasons, independent of whether the crop passed the threshold.
pub fn recommendation_reasons(
    crop: &Crop,
    soil: &SoilSample,
    weather: &WeatherSnapshot,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(soil_type) = soil.soil_type.filter(|t| crop.suits_soil(*t)) {
        reasons.push(format!("Suitable for {} soil", soil_type));
    }

    if crop.market_price > PREMIUM_PRICE_PER_KG {
        reasons.push("Good market price".to_string());
    }

    if crop.water_requirement == WaterRequirement::Low && weather.rainfall_mm < HEAVY_RAIN_MM {
        reasons.push("Low water requirement matches rainfall".to_string());
    }

    if crop.yield_kg > HIGH_YIELD_KG {
        reasons.push("High yield potential".to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::mock;
    use crate::error::{CropOpsError, ValidationError};
    use crate::logic::catalog::crop_catalog;
    use crate::models::{SoilType, TemperatureRange};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
    }

    fn example_crop() -> Crop {
        Crop {
            id: "paddy",
            name: "Paddy",
            name_hindi: "धान",
            season: Season::Kharif,
            duration_days: 120,
            water_requirement: WaterRequirement::High,
            soil_types: &[SoilType::Loamy],
            temperature_range: TemperatureRange::new(20.0, 35.0),
            yield_kg: 3000.0,
            market_price: 25.0,
        }
    }

    fn example_weather() -> WeatherSnapshot {
        let mut w = mock::mock_weather(today());
        w.temperature_c = 28.0;
        w.forecast[0].temp_max_c = 32.0;
        w.rainfall_mm = 15.0;
        w
    }

    fn example_soil() -> SoilSample {
        SoilSample {
            soil_type: Some(SoilType::Loamy),
            ph: 6.5,
            organic_matter_pct: 2.1,
            ..SoilSample::default()
        }
    }

    #[test]
    fn worked_example_scores_085() {
        let crop = example_crop();
        let b = score_crop(
            &crop,
            &example_soil(),
            &example_weather(),
            Some(Season::Kharif),
        );

        assert_eq!(b.soil, 30);
        assert_eq!(b.temperature, 25);
        assert_eq!(b.season, 20);
        assert_eq!(b.water, 0);
        assert_eq!(b.market, 10);
        assert_eq!(b.score(), 0.85);
        assert_eq!(
            expected_yield(&crop, &example_soil(), &example_weather()),
            4356
        );
    }

    #[test]
    fn worked_example_recommendation() {
        let catalog = [example_crop()];
        let scorer = CropScorer::new(&catalog, ScoringMode::Legacy);
        let recs = scorer
            .recommend(
                &Location::default(),
                &example_soil(),
                &example_weather(),
                2.0,
                "kharif",
                today(),
            )
            .unwrap();

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.score, 0.85);
        assert_eq!(rec.sowing_date, NaiveDate::from_ymd_opt(2026, 7, 31).unwrap());
        assert_eq!(
            rec.harvest_date,
            NaiveDate::from_ymd_opt(2026, 11, 28).unwrap()
        );
        assert_eq!(rec.expected_yield_kg, 4356);
        assert_eq!(
            rec.reasons,
            vec![
                "Suitable for loamy soil",
                "Good market price",
                "High yield potential"
            ]
        );
    }

    #[test]
    fn estimated_profit_is_gross_revenue_without_costs() {
        let catalog = [example_crop()];
        let scorer = CropScorer::new(&catalog, ScoringMode::Legacy);
        let recs = scorer
            .recommend(
                &Location::default(),
                &example_soil(),
                &example_weather(),
                2.0,
                "kharif",
                today(),
            )
            .unwrap();

        // yield × price × acres, nothing deducted for seed, fertilizer or labour
        assert_eq!(recs[0].estimated_profit, 4356.0 * 25.0 * 2.0);
    }

    #[test]
    fn default_catalog_ranking_keeps_catalog_order_on_ties() {
        let scorer = CropScorer::new(crop_catalog(), ScoringMode::Legacy);
        let recs = scorer
            .recommend(
                &Location::default(),
                &SoilSample::default(),
                &example_weather(),
                2.0,
                "kharif",
                today(),
            )
            .unwrap();

        let ranked: Vec<(&str, u32)> = recs
            .iter()
            .map(|r| (r.crop.id, r.score_percent()))
            .collect();
        assert_eq!(
            ranked,
            vec![("rice", 85), ("cotton", 85), ("sugarcane", 75), ("maize", 75)]
        );
    }

    #[test]
    fn score_exactly_at_threshold_is_excluded() {
        // soil + season + market = 0.60
        let crop = Crop {
            temperature_range: TemperatureRange::new(-10.0, 0.0),
            ..example_crop()
        };
        let b = score_crop(
            &crop,
            &example_soil(),
            &example_weather(),
            Some(Season::Kharif),
        );
        assert_eq!(b.score(), ACCEPTANCE_THRESHOLD);

        let catalog = [crop];
        let scorer = CropScorer::new(&catalog, ScoringMode::Legacy);
        let recs = scorer
            .recommend(
                &Location::default(),
                &example_soil(),
                &example_weather(),
                1.0,
                "kharif",
                today(),
            )
            .unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn score_just_above_threshold_is_included() {
        // soil + temperature + market = 0.65
        let crop = Crop {
            season: Season::Rabi,
            ..example_crop()
        };
        let catalog = [crop];
        let scorer = CropScorer::new(&catalog, ScoringMode::Legacy);
        let recs = scorer
            .recommend(
                &Location::default(),
                &example_soil(),
                &example_weather(),
                1.0,
                "kharif",
                today(),
            )
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].score_percent(), 65);
    }

    #[test]
    fn matching_season_always_earns_season_credit() {
        let weather = example_weather();
        for crop in crop_catalog() {
            let b = score_crop(crop, &example_soil(), &weather, Some(crop.season));
            assert_eq!(b.season, 20, "{}", crop.id);
        }
    }

    #[test]
    fn year_round_crops_earn_season_credit_for_any_season() {
        let sugarcane = crop_catalog().iter().find(|c| c.id == "sugarcane").unwrap();
        for season in [None, Some(Season::Kharif), Some(Season::Rabi), Some(Season::Zaid)] {
            let b = score_crop(sugarcane, &example_soil(), &example_weather(), season);
            assert_eq!(b.season, 20);
        }
    }

    #[test]
    fn soil_credit_iff_texture_listed() {
        let weather = example_weather();
        for crop in crop_catalog() {
            for soil_type in [
                SoilType::Clay,
                SoilType::Sandy,
                SoilType::Loamy,
                SoilType::Silty,
            ] {
                let soil = SoilSample {
                    soil_type: Some(soil_type),
                    ..SoilSample::default()
                };
                let b = score_crop(crop, &soil, &weather, Some(Season::Kharif));
                let expected = if crop.soil_types.contains(&soil_type) {
                    30
                } else {
                    0
                };
                assert_eq!(b.soil, expected, "{} on {}", crop.id, soil_type);
            }
        }
    }

    #[test]
    fn water_bands() {
        assert!(water_matches_rainfall(WaterRequirement::High, 100.1));
        assert!(!water_matches_rainfall(WaterRequirement::High, 100.0));
        assert!(water_matches_rainfall(WaterRequirement::Medium, 50.1));
        assert!(!water_matches_rainfall(WaterRequirement::Medium, 50.0));
        assert!(water_matches_rainfall(WaterRequirement::Low, 99.9));
        assert!(!water_matches_rainfall(WaterRequirement::Low, 100.0));
        // overlap: low and medium are both credited between 50 and 100mm
        assert!(water_matches_rainfall(WaterRequirement::Low, 75.0));
        assert!(water_matches_rainfall(WaterRequirement::Medium, 75.0));
    }

    #[test]
    fn scores_bounded_sorted_and_dated_across_conditions() {
        let scorer = CropScorer::new(crop_catalog(), ScoringMode::Legacy);
        let base = mock::mock_weather(today());

        for temp in [-5.0, 12.0, 22.0, 28.0, 33.0, 45.0] {
            for rain in [0.0, 40.0, 75.0, 150.0] {
                for season in ["kharif", "rabi", "zaid", "all", "monsoon"] {
                    for soil_type in [SoilType::Clay, SoilType::Sandy, SoilType::Silty] {
                        let mut weather = base.clone();
                        weather.temperature_c = temp;
                        weather.rainfall_mm = rain;
                        let soil = SoilSample {
                            soil_type: Some(soil_type),
                            ..SoilSample::default()
                        };

                        for crop in crop_catalog() {
                            let s = score_crop(crop, &soil, &weather, Season::parse(season)).score();
                            assert!((0.0..=1.0).contains(&s));
                        }

                        let recs = scorer
                            .recommend(&Location::default(), &soil, &weather, 3.0, season, today())
                            .unwrap();

                        for pair in recs.windows(2) {
                            assert!(pair[0].score >= pair[1].score);
                        }
                        for rec in &recs {
                            assert!(rec.score > ACCEPTANCE_THRESHOLD);
                            assert_eq!(rec.growing_days(), rec.crop.duration_days as i64);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn sowing_lead_depends_on_kharif() {
        for crop in crop_catalog() {
            let lead = (sowing_date(crop, today()) - today()).num_days();
            if crop.season == Season::Kharif {
                assert_eq!(lead, 30);
            } else {
                assert_eq!(lead, 60);
            }
        }
    }

    #[test]
    fn yield_multipliers_compose() {
        let crop = example_crop();
        let weather = example_weather();

        let poor = SoilSample {
            organic_matter_pct: 1.0,
            ph: 5.0,
            ..example_soil()
        };
        assert_eq!(expected_yield(&crop, &poor, &weather), 3300);

        let mut cold = weather.clone();
        cold.temperature_c = 5.0;
        assert_eq!(expected_yield(&crop, &poor, &cold), 3000);

        let nan_soil = SoilSample {
            organic_matter_pct: f64::NAN,
            ph: f64::NAN,
            ..example_soil()
        };
        assert_eq!(expected_yield(&crop, &nan_soil, &cold), 3000);
    }

    #[test]
    fn reasons_are_independent_of_threshold() {
        let crop = Crop {
            water_requirement: WaterRequirement::Low,
            market_price: 5.0,
            yield_kg: 1500.0,
            soil_types: &[SoilType::Clay],
            ..example_crop()
        };
        let reasons = recommendation_reasons(&crop, &example_soil(), &example_weather());
        assert_eq!(reasons, vec!["Low water requirement matches rainfall"]);

        let none = Crop {
            water_requirement: WaterRequirement::Medium,
            ..crop
        };
        assert!(recommendation_reasons(&none, &example_soil(), &example_weather()).is_empty());
    }

    #[test]
    fn legacy_mode_tolerates_malformed_inputs() {
        let scorer = CropScorer::new(crop_catalog(), ScoringMode::Legacy);
        let mut weather = example_weather();
        weather.forecast.clear();
        let soil = SoilSample {
            soil_type: None,
            ..SoilSample::default()
        };

        let recs = scorer
            .recommend(&Location::default(), &soil, &weather, f64::NAN, "khariff", today())
            .unwrap();

        // without soil, temperature or season credit nothing can clear 0.6
        assert!(recs.is_empty());

        let b = score_crop(&crop_catalog()[0], &soil, &weather, Season::parse("khariff"));
        assert_eq!(b.soil, 0);
        assert_eq!(b.temperature, 0);
        assert_eq!(b.season, 0);
    }

    #[test]
    fn unknown_season_still_scores_other_factors_in_legacy_mode() {
        let scorer = CropScorer::new(crop_catalog(), ScoringMode::Legacy);
        let recs = scorer
            .recommend(
                &Location::default(),
                &SoilSample::default(),
                &example_weather(),
                1.0,
                "monsoon",
                today(),
            )
            .unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.crop.id).collect();
        // rice and cotton drop to 0.65, sugarcane keeps its year-round credit
        assert_eq!(ids, vec!["sugarcane", "rice", "cotton"]);
    }

    #[test]
    fn legacy_season_must_match_exactly() {
        let scorer = CropScorer::new(crop_catalog(), ScoringMode::Legacy);
        for season in ["KHARIF", " kharif ", "Kharif"] {
            let recs = scorer
                .recommend(
                    &Location::default(),
                    &SoilSample::default(),
                    &example_weather(),
                    1.0,
                    season,
                    today(),
                )
                .unwrap();
            let scored: Vec<(&str, u32)> =
                recs.iter().map(|r| (r.crop.id, r.score_percent())).collect();
            assert_eq!(
                scored,
                vec![("sugarcane", 75), ("rice", 65), ("cotton", 65)],
                "{:?}",
                season
            );
        }
    }

    #[test]
    fn strict_mode_rejects_malformed_inputs() {
        let scorer = CropScorer::new(crop_catalog(), ScoringMode::Strict);

        let err = scorer
            .recommend(
                &Location::default(),
                &SoilSample::default(),
                &example_weather(),
                2.0,
                "khariff",
                today(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CropOpsError::Validation(ValidationError::UnknownSeason(_))
        ));

        let mut weather = example_weather();
        weather.forecast.clear();
        let err = scorer
            .recommend(
                &Location::default(),
                &SoilSample::default(),
                &weather,
                2.0,
                "kharif",
                today(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CropOpsError::Validation(ValidationError::EmptyForecast)
        ));
    }

    #[test]
    fn strict_mode_matches_legacy_on_clean_inputs() {
        let legacy = CropScorer::new(crop_catalog(), ScoringMode::Legacy);
        let strict = CropScorer::new(crop_catalog(), ScoringMode::Strict);
        let args = (
            Location::default(),
            SoilSample::default(),
            example_weather(),
        );

        let a = legacy
            .recommend(&args.0, &args.1, &args.2, 2.0, "kharif", today())
            .unwrap();
        let b = strict
            .recommend(&args.0, &args.1, &args.2, 2.0, "Kharif", today())
            .unwrap();
        assert_eq!(a, b);
    }
}
