use crate::models::{
    FertilizerDose, FertilizerPlan, ImprovementEstimate, ImprovementLevel, ScheduleStep,
    SoilSample,
};

// Rupees per unit
const UREA_PRICE_PER_KG: f64 = 15.0;
const DAP_PRICE_PER_KG: f64 = 25.0;
const MOP_PRICE_PER_KG: f64 = 20.0;
const FYM_PRICE_PER_TON: f64 = 500.0;

const SCHEDULE: [ScheduleStep; 4] = [
    ScheduleStep {
        when: "15 days before sowing",
        activity: "Apply organic manure and prepare soil",
    },
    ScheduleStep {
        when: "At sowing",
        activity: "Apply basal fertilizers (DAP, MOP)",
    },
    ScheduleStep {
        when: "25-30 days after sowing",
        activity: "First top dressing of urea",
    },
    ScheduleStep {
        when: "45-50 days after sowing",
        activity: "Second top dressing of urea",
    },
];

/// Fertilizer doses needed to bring a sample's nutrients and organic matter up
/// to target, for a farm of `farm_size` acres.
pub fn fertilizer_plan(sample: &SoilSample, farm_size: f64) -> FertilizerPlan {
    let n = &sample.nutrients;
    let mut doses = Vec::new();
    let mut total_cost = 0.0;

    if n.nitrogen < 40.0 {
        let amount = ((50.0 - n.nitrogen) * farm_size * 0.1).max(0.0);
        doses.push(FertilizerDose {
            name: "Urea (46-0-0)",
            amount: round2(amount),
            unit: "kg",
            timing: "Split application - 50% at sowing, 50% at flowering",
        });
        total_cost += amount * UREA_PRICE_PER_KG;
    }

    if n.phosphorus < 20.0 {
        let amount = ((30.0 - n.phosphorus) * farm_size * 0.05).max(0.0);
        doses.push(FertilizerDose {
            name: "DAP (18-46-0)",
            amount: round2(amount),
            unit: "kg",
            timing: "Basal application at sowing",
        });
        total_cost += amount * DAP_PRICE_PER_KG;
    }

    if n.potassium < 150.0 {
        let amount = ((200.0 - n.potassium) * farm_size * 0.02).max(0.0);
        doses.push(FertilizerDose {
            name: "MOP (0-0-60)",
            amount: round2(amount),
            unit: "kg",
            timing: "Basal application at sowing",
        });
        total_cost += amount * MOP_PRICE_PER_KG;
    }

    if sample.organic_matter_pct < 2.0 {
        // 2 tons per acre
        let amount = farm_size * 2.0;
        doses.push(FertilizerDose {
            name: "Farm Yard Manure",
            amount: round2(amount),
            unit: "tons",
            timing: "Apply 15-20 days before sowing",
        });
        total_cost += amount * FYM_PRICE_PER_TON;
    }

    FertilizerPlan {
        doses,
        total_cost: total_cost.round().max(0.0) as u64,
        schedule: SCHEDULE.to_vec(),
    }
}

pub fn improvement_estimate(level: ImprovementLevel, farm_size: f64) -> ImprovementEstimate {
    let (per_acre, timeline, expected_improvement) = match level {
        ImprovementLevel::Basic => (2000.0, "6-12 months", "10-15% improvement in soil health"),
        ImprovementLevel::Moderate => (5000.0, "12-18 months", "25-30% improvement in soil health"),
        ImprovementLevel::Comprehensive => {
            (10000.0, "18-24 months", "40-50% improvement in soil health")
        }
    };

    ImprovementEstimate {
        level,
        cost: (farm_size * per_acre).round().max(0.0) as u64,
        timeline,
        expected_improvement,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrients;

    #[test]
    fn healthy_soil_needs_no_doses() {
        let plan = fertilizer_plan(&SoilSample::default(), 5.0);
        assert!(plan.doses.is_empty());
        assert_eq!(plan.total_cost, 0);
        assert_eq!(plan.schedule.len(), 4);
    }

    #[test]
    fn depleted_soil_gets_every_dose() {
        let sample = SoilSample {
            organic_matter_pct: 1.2,
            nutrients: Nutrients {
                nitrogen: 30.0,
                phosphorus: 10.0,
                potassium: 100.0,
            },
            ..SoilSample::default()
        };
        let plan = fertilizer_plan(&sample, 2.0);

        let names: Vec<&str> = plan.doses.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            [
                "Urea (46-0-0)",
                "DAP (18-46-0)",
                "MOP (0-0-60)",
                "Farm Yard Manure"
            ]
        );

        // urea 20*2*0.1 = 4kg, DAP 20*2*0.05 = 2kg, MOP 100*2*0.02 = 4kg, FYM 4 tons
        assert_eq!(plan.doses[0].amount, 4.0);
        assert_eq!(plan.doses[1].amount, 2.0);
        assert_eq!(plan.doses[2].amount, 4.0);
        assert_eq!(plan.doses[3].amount, 4.0);
        assert_eq!(plan.doses[3].unit, "tons");
        assert_eq!(plan.total_cost, 60 + 50 + 80 + 2000);
    }

    #[test]
    fn amounts_are_rounded_to_two_places() {
        let sample = SoilSample {
            nutrients: Nutrients {
                nitrogen: 33.3,
                ..SoilSample::default().nutrients
            },
            ..SoilSample::default()
        };
        let plan = fertilizer_plan(&sample, 1.5);
        // (50 - 33.3) * 1.5 * 0.1 = 2.505
        assert_eq!(plan.doses.len(), 1);
        assert!((plan.doses[0].amount - 2.5).abs() < 0.011);
        assert_eq!(plan.total_cost, 38);
    }

    #[test]
    fn improvement_costs_scale_with_farm_size() {
        let basic = improvement_estimate(ImprovementLevel::Basic, 2.5);
        assert_eq!(basic.cost, 5000);
        assert_eq!(basic.timeline, "6-12 months");

        let moderate = improvement_estimate(ImprovementLevel::Moderate, 2.5);
        assert_eq!(moderate.cost, 12500);

        let comprehensive = improvement_estimate(ImprovementLevel::Comprehensive, 1.0);
        assert_eq!(comprehensive.cost, 10000);
        assert_eq!(
            comprehensive.expected_improvement,
            "40-50% improvement in soil health"
        );
    }
}
