//! Offline stand-ins used when no live source is configured or reachable.
//! Values are fixed so the same day always yields the same advice.

use crate::models::{
    DailyForecast, MarketPrice, PriceTrend, PriceUnit, WeatherCondition, WeatherSnapshot,
    WeatherSource,
};
use chrono::{Duration, NaiveDate, Utc};

const FORECAST_DAYS: i64 = 7;

const CONDITIONS: [WeatherCondition; 7] = [
    WeatherCondition::Sunny,
    WeatherCondition::Cloudy,
    WeatherCondition::Sunny,
    WeatherCondition::Rainy,
    WeatherCondition::Stormy,
    WeatherCondition::Cloudy,
    WeatherCondition::Sunny,
];

const DAILY_RAIN_MM: [f64; 7] = [0.0, 2.5, 0.0, 6.0, 12.0, 1.5, 0.0];

pub fn mock_weather(today: NaiveDate) -> WeatherSnapshot {
    let forecast = (0..FORECAST_DAYS)
        .map(|i| {
            let idx = i as usize;
            DailyForecast {
                date: today + Duration::days(i),
                temp_min_c: 22.0 + (i % 3) as f64,
                temp_max_c: 32.0 + (i % 4) as f64,
                humidity_pct: 60.0 + 3.0 * i as f64,
                rainfall_mm: DAILY_RAIN_MM[idx],
                condition: CONDITIONS[idx],
            }
        })
        .collect();

    WeatherSnapshot {
        temperature_c: 28.0,
        humidity_pct: 65.0,
        rainfall_mm: 15.0,
        wind_speed: 12.0,
        pressure_hpa: 1013.0,
        forecast,
        fetched_at: Utc::now(),
        source: WeatherSource::Mock,
    }
}

pub fn mock_market_prices(today: NaiveDate) -> Vec<MarketPrice> {
    [
        ("rice", "Rice", 25.0, "Delhi", PriceTrend::Up),
        ("wheat", "Wheat", 22.0, "Punjab", PriceTrend::Stable),
        ("cotton", "Cotton", 80.0, "Gujarat", PriceTrend::Down),
    ]
    .into_iter()
    .map(|(id, name, price, location, trend)| MarketPrice {
        crop_id: id.to_string(),
        crop_name: name.to_string(),
        price,
        unit: PriceUnit::Kg,
        location: location.to_string(),
        date: today,
        trend,
    })
    .collect()
}
