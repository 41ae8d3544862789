use crate::config::OpenWeatherMapConfig;
use crate::error::{CropOpsError, Result};
use crate::models::{Coordinates, DailyForecast, WeatherCondition, WeatherSnapshot, WeatherSource};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const MAX_FORECAST_DAYS: usize = 7;
const MS_TO_KMH: f64 = 3.6;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmCurrentMain,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentMain {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
    #[serde(default)]
    city: Option<OwmCity>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmForecastMain,
    weather: Vec<OwmWeather>,
    #[serde(default)]
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastMain {
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    /// Shift from UTC in seconds
    #[serde(default)]
    timezone: i64,
}

/// One 3-hour forecast slot, already in local time.
struct ForecastPoint {
    date: NaiveDate,
    temp_min_c: f64,
    temp_max_c: f64,
    humidity_pct: f64,
    rainfall_mm: f64,
    condition: WeatherCondition,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Current conditions plus a daily forecast built from the 5-day/3-hour feed.
    pub async fn fetch_weather(&self, coords: &Coordinates) -> Result<WeatherSnapshot> {
        let current: OwmCurrentResponse = self.get_json("weather", coords).await?;
        let forecast: OwmForecastResponse = self.get_json("forecast", coords).await?;

        Ok(convert_response(current, forecast, Utc::now()))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, coords: &Coordinates) -> Result<bool> {
        let url = self.endpoint("weather", coords)?;
        let response =
            self.client.get(url).send().await.map_err(|e| {
                CropOpsError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn endpoint(&self, path: &str, coords: &Coordinates) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/{}", API_BASE_URL, path),
            &[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lng.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ],
        )
        .map_err(|e| CropOpsError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        coords: &Coordinates,
    ) -> Result<T> {
        let url = self.endpoint(path, coords)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                CropOpsError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropOpsError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            CropOpsError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }
}

fn convert_response(
    current: OwmCurrentResponse,
    forecast: OwmForecastResponse,
    fetched_at: DateTime<Utc>,
) -> WeatherSnapshot {
    let tz_offset = forecast.city.as_ref().map(|c| c.timezone).unwrap_or(0);

    let points: Vec<ForecastPoint> = forecast
        .list
        .iter()
        .filter_map(|item| convert_forecast_item(item, tz_offset))
        .collect();

    let rainfall_mm = current
        .rain
        .as_ref()
        .map(|r| r.one_hour)
        .unwrap_or(0.0);

    WeatherSnapshot {
        temperature_c: current.main.temp,
        humidity_pct: current.main.humidity,
        rainfall_mm,
        wind_speed: current.wind.speed * MS_TO_KMH,
        pressure_hpa: current.main.pressure,
        forecast: aggregate_daily(&points),
        fetched_at,
        source: WeatherSource::OpenWeatherMap,
    }
}

fn convert_forecast_item(item: &OwmForecastItem, tz_offset: i64) -> Option<ForecastPoint> {
    let date = DateTime::from_timestamp(item.dt + tz_offset, 0)?.date_naive();

    let condition = item
        .weather
        .first()
        .map(|w| WeatherCondition::from_owm_id(w.id))
        .unwrap_or_default();

    Some(ForecastPoint {
        date,
        temp_min_c: item.main.temp_min,
        temp_max_c: item.main.temp_max,
        humidity_pct: item.main.humidity,
        rainfall_mm: item.rain.as_ref().map(|r| r.three_hour).unwrap_or(0.0),
        condition,
    })
}

fn aggregate_daily(points: &[ForecastPoint]) -> Vec<DailyForecast> {
    // Group by local date
    let mut by_date: HashMap<NaiveDate, Vec<&ForecastPoint>> = HashMap::new();
    for point in points {
        by_date.entry(point.date).or_default().push(point);
    }

    let mut days: Vec<DailyForecast> = by_date
        .into_iter()
        .map(|(date, points)| aggregate_day(date, &points))
        .collect();

    days.sort_by_key(|d| d.date);
    days.truncate(MAX_FORECAST_DAYS);
    days
}

fn aggregate_day(date: NaiveDate, points: &[&ForecastPoint]) -> DailyForecast {
    let temp_max_c = points
        .iter()
        .map(|p| p.temp_max_c)
        .fold(f64::NEG_INFINITY, f64::max);

    let temp_min_c = points
        .iter()
        .map(|p| p.temp_min_c)
        .fold(f64::INFINITY, f64::min);

    let humidity_pct =
        points.iter().map(|p| p.humidity_pct).sum::<f64>() / points.len().max(1) as f64;

    let rainfall_mm: f64 = points.iter().map(|p| p.rainfall_mm).sum();

    // Most frequent condition; ties go to the more severe one
    let mut condition_counts: HashMap<WeatherCondition, usize> = HashMap::new();
    for point in points {
        *condition_counts.entry(point.condition).or_insert(0) += 1;
    }
    let condition = condition_counts
        .into_iter()
        .max_by_key(|(condition, count)| (*count, severity_rank(*condition)))
        .map(|(condition, _)| condition)
        .unwrap_or_default();

    DailyForecast {
        date,
        temp_min_c,
        temp_max_c,
        humidity_pct,
        rainfall_mm,
        condition,
    }
}

fn severity_rank(condition: WeatherCondition) -> u8 {
    match condition {
        WeatherCondition::Sunny => 0,
        WeatherCondition::Cloudy => 1,
        WeatherCondition::Rainy => 2,
        WeatherCondition::Stormy => 3,
    }
}
