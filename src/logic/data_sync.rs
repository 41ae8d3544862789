use crate::config::Config;
use crate::datasources::{mock, MarketClient, OpenWeatherMapClient};
use crate::db::Database;
use crate::models::{Location, MarketPrice, WeatherSnapshot};
use chrono::NaiveDate;

/// Snapshots kept in the weather cache after each successful fetch
const WEATHER_CACHE_KEEP: u32 = 48;

/// Pulls live data when configured and falls back to the local cache, then to
/// fixed mock data. Refreshes never fail; problems are logged instead.
pub struct DataSyncService {
    db: Database,
    openweathermap_client: Option<OpenWeatherMapClient>,
    market_client: Option<MarketClient>,
}

impl DataSyncService {
    pub fn new(config: &Config, db: Database) -> Self {
        // Create OpenWeatherMap client if configured and enabled
        let openweathermap_client = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("OpenWeatherMap client configured");
                OpenWeatherMapClient::new(c.clone())
            });

        if openweathermap_client.is_none() {
            tracing::info!("OpenWeatherMap not configured - using cached or mock weather");
        }

        let market_client = config
            .market
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("Market price client configured");
                MarketClient::new(c.clone())
            });

        if market_client.is_none() {
            tracing::info!("Market API not configured - using cached or mock prices");
        }

        Self {
            db,
            openweathermap_client,
            market_client,
        }
    }

    pub async fn refresh_weather(&self, location: &Location, today: NaiveDate) -> WeatherSnapshot {
        if let Some(ref client) = self.openweathermap_client {
            match client.fetch_weather(&location.coordinates).await {
                Ok(snapshot) => {
                    if let Err(e) = self.db.cache_weather(&snapshot, &location.coordinates) {
                        tracing::warn!("Failed to cache weather: {}", e);
                    } else if let Err(e) = self.db.prune_weather_cache(WEATHER_CACHE_KEEP) {
                        tracing::warn!("Failed to prune weather cache: {}", e);
                    }
                    tracing::debug!("Weather updated from OpenWeatherMap");
                    return snapshot;
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch weather: {}", e);
                }
            }
        }

        match self.db.latest_weather(&location.coordinates) {
            Ok(Some(cached)) => {
                tracing::debug!("Using cached weather from {}", cached.fetched_at);
                return cached;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read weather cache: {}", e),
        }

        tracing::debug!("Using mock weather");
        mock::mock_weather(today)
    }

    pub async fn refresh_market(
        &self,
        commodity: Option<&str>,
        today: NaiveDate,
    ) -> Vec<MarketPrice> {
        if let Some(ref client) = self.market_client {
            match client.fetch_prices(commodity, today).await {
                Ok(prices) => {
                    // A commodity-filtered fetch is partial; only full lists replace the cache
                    if commodity.is_none() {
                        if let Err(e) = self.db.cache_market_prices(&prices) {
                            tracing::warn!("Failed to cache market prices: {}", e);
                        }
                    }
                    tracing::debug!("Fetched {} market prices", prices.len());
                    return prices;
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch market prices: {}", e);
                }
            }
        }

        let fallback = match self.db.cached_market_prices() {
            Ok(cached) if !cached.is_empty() => cached,
            Ok(_) => mock::mock_market_prices(today),
            Err(e) => {
                tracing::warn!("Failed to read market cache: {}", e);
                mock::mock_market_prices(today)
            }
        };

        filter_by_commodity(fallback, commodity)
    }

    pub async fn check_connections(&self, location: &Location) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        if let Some(ref client) = self.openweathermap_client {
            status.openweathermap = Some(
                client
                    .test_connection(&location.coordinates)
                    .await
                    .unwrap_or(false),
            );
        }

        if let Some(ref client) = self.market_client {
            status.market = Some(client.test_connection().await.unwrap_or(false));
        }

        status
    }
}

fn filter_by_commodity(prices: Vec<MarketPrice>, commodity: Option<&str>) -> Vec<MarketPrice> {
    match commodity {
        Some(c) => prices
            .into_iter()
            .filter(|p| p.crop_id.eq_ignore_ascii_case(c) || p.crop_name.eq_ignore_ascii_case(c))
            .collect(),
        None => prices,
    }
}

/// `None` means the source is not configured.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub openweathermap: Option<bool>,
    pub market: Option<bool>,
}

impl ConnectionStatus {
    pub fn any_connected(&self) -> bool {
        self.openweathermap == Some(true) || self.market == Some(true)
    }

    pub fn all_configured_connected(&self) -> bool {
        [self.openweathermap, self.market]
            .iter()
            .flatten()
            .all(|ok| *ok)
    }
}
