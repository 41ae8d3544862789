use crate::models::{HealthStatus, Nutrients, SoilHealthReport, SoilSample, SoilSubScores};

/// Nutrient blend below this adds a fertilizer recommendation
const NUTRIENT_ADEQUATE: u32 = 20;

/// Score a soil sample out of 100: pH 25, organic matter 25, N/P/K 30,
/// moisture 20. Each factor earns full, partial or low credit by band.
pub fn analyze_soil_health(sample: &SoilSample) -> SoilHealthReport {
    let mut recommendations = Vec::new();
    let mut improvements = Vec::new();
    let mut sub = SoilSubScores::default();

    sub.ph = if in_range(sample.ph, 6.0, 7.5) {
        25
    } else if in_range(sample.ph, 5.5, 8.0) {
        recommendations.push("pH level is acceptable but not optimal".to_string());
        15
    } else {
        recommendations.push("pH level needs adjustment".to_string());
        if sample.ph < 6.0 {
            improvements.push("Add lime to increase pH".to_string());
        } else {
            improvements.push("Add sulfur or organic matter to decrease pH".to_string());
        }
        5
    };

    let om = sample.organic_matter_pct;
    sub.organic_matter = if om >= 3.0 {
        25
    } else if om >= 2.0 {
        20
    } else if om >= 1.0 {
        recommendations.push("Organic matter content is low".to_string());
        improvements.push("Add compost, manure, or green manure".to_string());
        10
    } else {
        recommendations.push("Organic matter content is very low".to_string());
        improvements.push("Urgent: Add organic matter through composting".to_string());
        5
    };

    score_nutrients(&sample.nutrients, &mut sub);
    if sub.nutrients() < NUTRIENT_ADEQUATE {
        recommendations.push("Nutrient levels are inadequate".to_string());
        improvements.push("Apply balanced NPK fertilizer".to_string());
    }

    let moisture = sample.moisture_pct;
    sub.moisture = if in_range(moisture, 50.0, 80.0) {
        20
    } else if in_range(moisture, 40.0, 90.0) {
        recommendations.push("Soil moisture needs attention".to_string());
        15
    } else {
        recommendations.push("Soil moisture is problematic".to_string());
        if moisture < 40.0 {
            improvements.push("Improve irrigation and water retention".to_string());
        } else {
            improvements.push("Improve drainage to prevent waterlogging".to_string());
        }
        5
    };

    let overall_score = sub.total();

    SoilHealthReport {
        overall_score,
        status: HealthStatus::from_score(overall_score),
        sub_scores: sub,
        recommendations,
        improvements,
    }
}

fn score_nutrients(n: &Nutrients, sub: &mut SoilSubScores) {
    sub.nitrogen = band(n.nitrogen, (40.0, 60.0), (30.0, 70.0));
    sub.phosphorus = band(n.phosphorus, (20.0, 40.0), (15.0, 50.0));
    sub.potassium = band(n.potassium, (150.0, 250.0), (120.0, 300.0));
}

// 10 inside the optimal range, 7 inside the tolerable range, else 3
fn band(value: f64, optimal: (f64, f64), tolerable: (f64, f64)) -> u32 {
    if in_range(value, optimal.0, optimal.1) {
        10
    } else if in_range(value, tolerable.0, tolerable.1) {
        7
    } else {
        3
    }
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sample_is_excellent() {
        // N=45 sits inside the 40-60 optimal band, so nitrogen earns full credit
        let report = analyze_soil_health(&SoilSample::default());

        assert_eq!(report.sub_scores.ph, 25);
        assert_eq!(report.sub_scores.organic_matter, 20);
        assert_eq!(report.sub_scores.nitrogen, 10);
        assert_eq!(report.sub_scores.phosphorus, 10);
        assert_eq!(report.sub_scores.potassium, 10);
        assert_eq!(report.sub_scores.moisture, 20);
        assert_eq!(report.overall_score, 95);
        assert_eq!(report.status, HealthStatus::Excellent);
        assert!(report.recommendations.is_empty());
        assert!(report.improvements.is_empty());
    }

    #[test]
    fn partial_nitrogen_band() {
        let mut sample = SoilSample::default();
        sample.nutrients.nitrogen = 35.0;
        let report = analyze_soil_health(&sample);
        assert_eq!(report.sub_scores.nitrogen, 7);
        assert_eq!(report.overall_score, 92);
        assert_eq!(report.status, HealthStatus::Excellent);
    }

    #[test]
    fn acidic_soil_needs_lime() {
        let sample = SoilSample {
            ph: 5.0,
            ..SoilSample::default()
        };
        let report = analyze_soil_health(&sample);
        assert_eq!(report.sub_scores.ph, 5);
        assert!(report
            .recommendations
            .contains(&"pH level needs adjustment".to_string()));
        assert_eq!(report.improvements, vec!["Add lime to increase pH"]);
    }

    #[test]
    fn alkaline_soil_needs_sulfur() {
        let sample = SoilSample {
            ph: 8.5,
            ..SoilSample::default()
        };
        let report = analyze_soil_health(&sample);
        assert_eq!(
            report.improvements,
            vec!["Add sulfur or organic matter to decrease pH"]
        );
    }

    #[test]
    fn marginal_ph_is_partial_credit() {
        for ph in [5.5, 5.9, 7.6, 8.0] {
            let sample = SoilSample {
                ph,
                ..SoilSample::default()
            };
            let report = analyze_soil_health(&sample);
            assert_eq!(report.sub_scores.ph, 15, "ph {}", ph);
            assert!(report.improvements.is_empty());
        }
    }

    #[test]
    fn organic_matter_bands() {
        let cases = [(3.5, 25), (3.0, 25), (2.0, 20), (1.5, 10), (0.4, 5)];
        for (om, expected) in cases {
            let sample = SoilSample {
                organic_matter_pct: om,
                ..SoilSample::default()
            };
            assert_eq!(
                analyze_soil_health(&sample).sub_scores.organic_matter,
                expected,
                "om {}",
                om
            );
        }
    }

    #[test]
    fn depleted_nutrients_recommend_npk() {
        let sample = SoilSample {
            nutrients: Nutrients {
                nitrogen: 10.0,
                phosphorus: 5.0,
                potassium: 80.0,
            },
            ..SoilSample::default()
        };
        let report = analyze_soil_health(&sample);
        assert_eq!(report.sub_scores.nutrients(), 9);
        assert!(report
            .improvements
            .contains(&"Apply balanced NPK fertilizer".to_string()));
    }

    #[test]
    fn moisture_extremes() {
        let dry = SoilSample {
            moisture_pct: 20.0,
            ..SoilSample::default()
        };
        let report = analyze_soil_health(&dry);
        assert_eq!(report.sub_scores.moisture, 5);
        assert_eq!(
            report.improvements,
            vec!["Improve irrigation and water retention"]
        );

        let wet = SoilSample {
            moisture_pct: 95.0,
            ..SoilSample::default()
        };
        let report = analyze_soil_health(&wet);
        assert_eq!(
            report.improvements,
            vec!["Improve drainage to prevent waterlogging"]
        );

        let borderline = SoilSample {
            moisture_pct: 85.0,
            ..SoilSample::default()
        };
        assert_eq!(analyze_soil_health(&borderline).sub_scores.moisture, 15);
    }

    #[test]
    fn worst_case_is_poor() {
        let sample = SoilSample {
            soil_type: None,
            ph: 4.0,
            organic_matter_pct: 0.2,
            nutrients: Nutrients {
                nitrogen: 0.0,
                phosphorus: 0.0,
                potassium: 0.0,
            },
            moisture_pct: 10.0,
        };
        let report = analyze_soil_health(&sample);
        assert_eq!(report.overall_score, 5 + 5 + 9 + 5);
        assert_eq!(report.status, HealthStatus::Poor);
    }

    #[test]
    fn score_stays_within_bounds() {
        for ph in [3.0, 6.5, 9.0] {
            for om in [0.0, 1.5, 4.0] {
                for moisture in [10.0, 45.0, 60.0, 99.0] {
                    let sample = SoilSample {
                        ph,
                        organic_matter_pct: om,
                        moisture_pct: moisture,
                        ..SoilSample::default()
                    };
                    let score = analyze_soil_health(&sample).overall_score;
                    assert!(score <= 100 && score >= 24);
                }
            }
        }
    }
}
