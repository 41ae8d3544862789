//! Daily mandi prices from the data.gov.in commodity resource.

use crate::config::MarketConfig;
use crate::error::{CropOpsError, Result};
use crate::models::{MarketPrice, PriceTrend, PriceUnit};
use chrono::NaiveDate;
use regex_lite::Regex;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

pub struct MarketClient {
    client: reqwest::Client,
    config: MarketConfig,
}

#[derive(Debug, Deserialize)]
struct MarketResponse {
    #[serde(default)]
    records: Vec<MarketRecord>,
}

/// Price fields arrive as strings, numbers or not at all depending on the
/// reporting market, so they are kept raw until mapped.
#[derive(Debug, Default, Deserialize)]
struct MarketRecord {
    #[serde(default)]
    commodity: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    market: Option<String>,
    #[serde(default)]
    arrival_date: Option<String>,
    #[serde(default)]
    min_price: Option<Value>,
    #[serde(default)]
    max_price: Option<Value>,
    #[serde(default)]
    modal_price: Option<Value>,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Latest prices, optionally narrowed to one commodity.
    pub async fn fetch_prices(
        &self,
        commodity: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<MarketPrice>> {
        let url = self.endpoint(commodity)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                CropOpsError::DataSourceUnavailable(format!("data.gov.in: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(CropOpsError::DataSourceUnavailable(format!(
                "data.gov.in returned {}",
                status
            )));
        }

        let body: MarketResponse = response.json().await.map_err(|e| {
            CropOpsError::DataSourceUnavailable(format!("Failed to parse market response: {}", e))
        })?;

        convert_records(body.records, today)
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.endpoint(None)?;
        let response =
            self.client.get(url).send().await.map_err(|e| {
                CropOpsError::DataSourceUnavailable(format!("data.gov.in: {}", e))
            })?;
        Ok(response.status().is_success())
    }

    fn endpoint(&self, commodity: Option<&str>) -> Result<Url> {
        let mut params = vec![
            ("api-key", self.config.api_key.clone()),
            ("format", "json".to_string()),
            ("limit", self.config.limit.to_string()),
        ];
        if let Some(state) = self
            .config
            .state
            .as_ref()
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
        {
            params.push(("filters[state]", state.clone()));
        }
        if let Some(commodity) = commodity {
            params.push(("filters[commodity]", commodity.to_string()));
        }

        Url::parse_with_params(&self.config.base_url, &params)
            .map_err(|e| CropOpsError::Config(format!("Invalid market base URL: {}", e)))
    }
}

fn convert_records(records: Vec<MarketRecord>, today: NaiveDate) -> Result<Vec<MarketPrice>> {
    if records.is_empty() {
        return Err(CropOpsError::InvalidData(
            "No records from market API".to_string(),
        ));
    }

    Ok(records.iter().map(|r| map_record(r, today)).collect())
}

fn map_record(record: &MarketRecord, today: NaiveDate) -> MarketPrice {
    let commodity = record
        .commodity
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("Unknown");

    let modal = to_number(record.modal_price.as_ref());
    let min = to_number(record.min_price.as_ref());
    let max = to_number(record.max_price.as_ref());

    let price = if modal.is_finite() && modal > 0.0 {
        modal
    } else if min.is_finite() && max.is_finite() {
        ((min + max) / 2.0 * 100.0).round() / 100.0
    } else {
        0.0
    };

    // A missing or zero bound falls back to the price itself
    let low = bound_or(record.min_price.as_ref(), price);
    let high = bound_or(record.max_price.as_ref(), price);
    let midpoint = (low + high) / 2.0;
    let trend = if price > midpoint {
        PriceTrend::Up
    } else if price < midpoint {
        PriceTrend::Down
    } else {
        PriceTrend::Stable
    };

    let location = [&record.market, &record.district, &record.state]
        .iter()
        .filter_map(|s| s.as_deref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    MarketPrice {
        crop_id: crop_id(commodity),
        crop_name: commodity.to_string(),
        price,
        unit: PriceUnit::Quintal,
        location: if location.is_empty() {
            "N/A".to_string()
        } else {
            location
        },
        date: record
            .arrival_date
            .as_deref()
            .and_then(parse_arrival_date)
            .unwrap_or(today),
        trend,
    }
}

/// Lowercased commodity with every whitespace run, edges included, replaced by `-`.
fn crop_id(commodity: &str) -> String {
    WHITESPACE_RE.replace_all(commodity, "-").to_lowercase()
}

/// `dd/mm/yyyy`, also accepting `.` separators
fn parse_arrival_date(s: &str) -> Option<NaiveDate> {
    let normalized = s.trim().replace('.', "/");
    let parts: Vec<&str> = normalized.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Numeric value of a raw field. Missing or unparseable values are NaN,
/// explicit nulls and blank strings are zero.
fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) if s.trim().is_empty() => 0.0,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        Some(_) => f64::NAN,
    }
}

fn bound_or(value: Option<&Value>, fallback: f64) -> f64 {
    let is_blank = match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    };
    if is_blank {
        fallback
    } else {
        to_number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn record(value: Value) -> MarketRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_typical_record() {
        let r = record(json!({
            "state": "Punjab",
            "district": "Ludhiana",
            "market": "Khanna",
            "commodity": "Paddy(Dhan)(Common)",
            "arrival_date": "17/10/2026",
            "min_price": "2200",
            "max_price": "2400",
            "modal_price": "2350"
        }));
        let p = map_record(&r, today());

        assert_eq!(p.crop_id, "paddy(dhan)(common)");
        assert_eq!(p.price, 2350.0);
        assert_eq!(p.unit, PriceUnit::Quintal);
        assert_eq!(p.location, "Khanna, Ludhiana, Punjab");
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(p.trend, PriceTrend::Up);
        assert_eq!(p.price_per_kg(), 23.5);
    }

    #[test]
    fn falls_back_to_min_max_mean() {
        let r = record(json!({
            "commodity": "Green Gram",
            "min_price": 5000,
            "max_price": 5125,
            "modal_price": "0"
        }));
        let p = map_record(&r, today());
        assert_eq!(p.price, 5062.5);
        assert_eq!(p.crop_id, "green-gram");
        assert_eq!(p.trend, PriceTrend::Stable);
        assert_eq!(p.location, "N/A");
        assert_eq!(p.date, today());
    }

    #[test]
    fn no_usable_price_is_zero() {
        let r = record(json!({"commodity": "Onion", "modal_price": "n/a"}));
        let p = map_record(&r, today());
        assert_eq!(p.price, 0.0);
        assert_eq!(p.trend, PriceTrend::Stable);
    }

    #[test]
    fn trend_below_midpoint_is_down() {
        let r = record(json!({
            "commodity": "Wheat",
            "min_price": "2000",
            "max_price": "2600",
            "modal_price": "2100"
        }));
        assert_eq!(map_record(&r, today()).trend, PriceTrend::Down);
    }

    #[test]
    fn missing_bounds_default_to_price() {
        let r = record(json!({"commodity": "Maize", "modal_price": "1900", "max_price": "2100"}));
        // midpoint of (1900, 2100) is 2000, so the price sits below it
        assert_eq!(map_record(&r, today()).trend, PriceTrend::Down);

        let r = record(json!({"commodity": "Maize", "modal_price": "1900"}));
        assert_eq!(map_record(&r, today()).trend, PriceTrend::Stable);
    }

    #[test]
    fn missing_commodity_is_unknown() {
        let p = map_record(&MarketRecord::default(), today());
        assert_eq!(p.crop_name, "Unknown");
        assert_eq!(p.crop_id, "unknown");
    }

    #[test]
    fn arrival_date_formats() {
        assert_eq!(
            parse_arrival_date("01.09.2026"),
            NaiveDate::from_ymd_opt(2026, 9, 1)
        );
        assert_eq!(parse_arrival_date("2026-09-01"), None);
        assert_eq!(parse_arrival_date("31/02/2026"), None);
    }

    #[test]
    fn empty_record_list_is_an_error() {
        let err = convert_records(Vec::new(), today()).unwrap_err();
        assert!(matches!(err, CropOpsError::InvalidData(_)));
    }

    #[test]
    fn endpoint_applies_filters() {
        let client = MarketClient::new(MarketConfig {
            api_key: "key".into(),
            base_url: crate::config::DEFAULT_MARKET_URL.into(),
            state: Some("Punjab".into()),
            limit: 50,
            enabled: true,
        });
        let url = client.endpoint(Some("Wheat")).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("limit".into(), "50".into())));
        assert!(pairs.contains(&("filters[state]".into(), "Punjab".into())));
        assert!(pairs.contains(&("filters[commodity]".into(), "Wheat".into())));

        let all = MarketClient::new(MarketConfig {
            state: Some("all".into()),
            ..client.config.clone()
        });
        assert!(!all
            .endpoint(None)
            .unwrap()
            .query_pairs()
            .any(|(k, _)| k == "filters[state]"));
    }

    #[test]
    fn crop_id_keeps_edge_whitespace_as_dashes() {
        assert_eq!(crop_id("Green  Gram"), "green-gram");
        assert_eq!(crop_id(" Bajra\t"), "-bajra-");
        assert_eq!(crop_id("Wheat"), "wheat");
    }
}
