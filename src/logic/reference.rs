//! Built-in disease, pest and government scheme reference data.

use crate::models::{Disease, FinancialScheme, Pest};

static DISEASES: [Disease; 2] = [
    Disease {
        id: "rice-blast",
        name: "Rice Blast",
        name_hindi: "चावल का ब्लास्ट",
        symptoms: &[
            "Brown spots on leaves",
            "White powdery growth",
            "Stunted growth",
        ],
        treatment: &[
            "Apply Tricyclazole",
            "Use resistant varieties",
            "Proper field drainage",
        ],
        prevention: &[
            "Avoid excessive nitrogen",
            "Maintain proper spacing",
            "Regular field monitoring",
        ],
        affected_crops: &["rice"],
    },
    Disease {
        id: "wheat-rust",
        name: "Wheat Rust",
        name_hindi: "गेहूं का रस्ट",
        symptoms: &[
            "Orange pustules on leaves",
            "Yellowing of leaves",
            "Reduced grain size",
        ],
        treatment: &[
            "Apply Propiconazole",
            "Use fungicide spray",
            "Remove infected plants",
        ],
        prevention: &[
            "Crop rotation",
            "Use resistant varieties",
            "Avoid dense planting",
        ],
        affected_crops: &["wheat"],
    },
];

static PESTS: [Pest; 2] = [
    Pest {
        id: "rice-borer",
        name: "Rice Stem Borer",
        name_hindi: "चावल का तना छेदक",
        description: "Larva bores into rice stems causing dead hearts",
        damage: &[
            "Dead hearts in young plants",
            "White heads in mature plants",
            "Reduced yield",
        ],
        control: &[
            "Use pheromone traps",
            "Apply Carbofuran",
            "Biological control with Trichogramma",
        ],
        affected_crops: &["rice"],
    },
    Pest {
        id: "cotton-bollworm",
        name: "Cotton Bollworm",
        name_hindi: "कपास का बॉलवर्म",
        description: "Caterpillar feeds on cotton bolls and flowers",
        damage: &["Holes in bolls", "Reduced fiber quality", "Yield loss"],
        control: &["Use Bt cotton", "Apply Spinosad", "Natural predators"],
        affected_crops: &["cotton"],
    },
];

static SCHEMES: [FinancialScheme; 2] = [
    FinancialScheme {
        id: "pm-kisan",
        name: "PM Kisan Samman Nidhi",
        name_hindi: "पीएम किसान सम्मान निधि",
        description: "Direct income support of ₹6000 per year to small and marginal farmers",
        eligibility: &["Small and marginal farmers", "Landholding up to 2 hectares"],
        benefits: &["₹6000 per year", "Direct bank transfer", "No middlemen"],
        application_steps: &[
            "Visit nearest CSC",
            "Submit land documents",
            "Bank account details",
        ],
        contact: "Toll-free: 1800-180-1551",
    },
    FinancialScheme {
        id: "crop-insurance",
        name: "Pradhan Mantri Fasal Bima Yojana",
        name_hindi: "प्रधानमंत्री फसल बीमा योजना",
        description: "Comprehensive crop insurance scheme for farmers",
        eligibility: &["All farmers", "All crops covered"],
        benefits: &[
            "Low premium rates",
            "Quick claim settlement",
            "Coverage for natural calamities",
        ],
        application_steps: &[
            "Contact insurance company",
            "Submit crop details",
            "Pay premium",
        ],
        contact: "Website: pmfby.gov.in",
    },
];

pub fn diseases() -> &'static [Disease] {
    &DISEASES
}

pub fn pests() -> &'static [Pest] {
    &PESTS
}

pub fn schemes() -> &'static [FinancialScheme] {
    &SCHEMES
}

/// Diseases and pests known to affect a crop, or everything when `crop_id` is `None`.
pub fn threats(crop_id: Option<&str>) -> (Vec<&'static Disease>, Vec<&'static Pest>) {
    match crop_id {
        Some(id) => (
            diseases().iter().filter(|d| d.affects(id)).collect(),
            pests().iter().filter(|p| p.affects(id)).collect(),
        ),
        None => (diseases().iter().collect(), pests().iter().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::catalog::find_crop;

    #[test]
    fn threats_filter_by_crop() {
        let (diseases, pests) = threats(Some("Rice"));
        assert_eq!(diseases.iter().map(|d| d.id).collect::<Vec<_>>(), ["rice-blast"]);
        assert_eq!(pests.iter().map(|p| p.id).collect::<Vec<_>>(), ["rice-borer"]);

        let (diseases, pests) = threats(Some("cotton"));
        assert!(diseases.is_empty());
        assert_eq!(pests[0].name, "Cotton Bollworm");

        let (diseases, pests) = threats(Some("maize"));
        assert!(diseases.is_empty() && pests.is_empty());

        let (diseases, pests) = threats(None);
        assert_eq!((diseases.len(), pests.len()), (2, 2));
    }

    #[test]
    fn affected_crops_exist_in_catalog() {
        for d in diseases() {
            assert!(d.affected_crops.iter().all(|c| find_crop(c).is_some()), "{}", d.id);
        }
        for p in pests() {
            assert!(p.affected_crops.iter().all(|c| find_crop(c).is_some()), "{}", p.id);
        }
    }

    #[test]
    fn schemes_are_complete() {
        let ids: Vec<&str> = schemes().iter().map(|s| s.id).collect();
        assert_eq!(ids, ["pm-kisan", "crop-insurance"]);
        for s in schemes() {
            assert!(!s.eligibility.is_empty());
            assert!(!s.benefits.is_empty());
            assert!(!s.application_steps.is_empty());
            assert!(!s.contact.is_empty());
        }
    }
}
