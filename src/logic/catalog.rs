use crate::models::{Crop, Season, SoilType, TemperatureRange, WaterRequirement};

static CROPS: [Crop; 5] = [
    Crop {
        id: "rice",
        name: "Rice",
        name_hindi: "चावल",
        season: Season::Kharif,
        duration_days: 120,
        water_requirement: WaterRequirement::High,
        soil_types: &[SoilType::Clay, SoilType::Loamy],
        temperature_range: TemperatureRange::new(20.0, 35.0),
        yield_kg: 3000.0,
        market_price: 25.0,
    },
    Crop {
        id: "wheat",
        name: "Wheat",
        name_hindi: "गेहूं",
        season: Season::Rabi,
        duration_days: 150,
        water_requirement: WaterRequirement::Medium,
        soil_types: &[SoilType::Loamy, SoilType::Sandy],
        temperature_range: TemperatureRange::new(15.0, 25.0),
        yield_kg: 4000.0,
        market_price: 22.0,
    },
    Crop {
        id: "sugarcane",
        name: "Sugarcane",
        name_hindi: "गन्ना",
        season: Season::All,
        duration_days: 365,
        water_requirement: WaterRequirement::High,
        soil_types: &[SoilType::Clay, SoilType::Loamy],
        temperature_range: TemperatureRange::new(25.0, 35.0),
        yield_kg: 80000.0,
        market_price: 3.5,
    },
    Crop {
        id: "cotton",
        name: "Cotton",
        name_hindi: "कपास",
        season: Season::Kharif,
        duration_days: 180,
        water_requirement: WaterRequirement::Medium,
        soil_types: &[SoilType::Sandy, SoilType::Loamy],
        temperature_range: TemperatureRange::new(20.0, 30.0),
        yield_kg: 500.0,
        market_price: 80.0,
    },
    Crop {
        id: "maize",
        name: "Maize",
        name_hindi: "मक्का",
        season: Season::Kharif,
        duration_days: 90,
        water_requirement: WaterRequirement::Medium,
        soil_types: &[SoilType::Loamy, SoilType::Sandy],
        temperature_range: TemperatureRange::new(18.0, 30.0),
        yield_kg: 2500.0,
        market_price: 20.0,
    },
];

/// The built-in crop catalog, in display order.
pub fn crop_catalog() -> &'static [Crop] {
    &CROPS
}

pub fn find_crop(id: &str) -> Option<&'static Crop> {
    CROPS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}
