use crate::db::Database;
use crate::error::{CropOpsError, Result, ValidationError};
use crate::logic::validation::validate_registration;
use crate::models::{
    Coordinates, Farmer, Language, Location, MarketPrice, PriceTrend, PriceUnit, Registration,
    WeatherSnapshot, WeatherSource,
};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};
use tracing::warn;

const CURRENT_FARMER_KEY: &str = "current_farmer_id";

// Settings

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
            Ok(())
        })
    }

    pub fn delete_setting(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

// Farmer Registry Queries
//
// A local stand-in for accounts: no password is stored and login only checks
// that the email is registered.

impl Database {
    /// Validate and store a new farmer, then make them the current farmer.
    pub fn register_farmer(&self, registration: &Registration) -> Result<Farmer> {
        validate_registration(registration)?;

        if self.find_farmer_by_email(&registration.email)?.is_some() {
            return Err(ValidationError::DuplicateEmail.into());
        }

        let farmer = Farmer {
            id: uuid::Uuid::new_v4().to_string(),
            name: registration.name.trim().to_string(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            location: registration.location.clone(),
            language: registration.language,
            farm_size: registration.farm_size,
            experience: registration.experience as u32,
            created_at: Utc::now(),
        };

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO farmers
                    (id, name, email, phone, state, district, village, latitude, longitude,
                     language, farm_size, experience, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
                params![
                    farmer.id,
                    farmer.name,
                    farmer.email,
                    farmer.phone,
                    farmer.location.state,
                    farmer.location.district,
                    farmer.location.village,
                    farmer.location.coordinates.lat,
                    farmer.location.coordinates.lng,
                    farmer.language.code(),
                    farmer.farm_size,
                    farmer.experience,
                    farmer.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })?;

        self.set_setting(CURRENT_FARMER_KEY, &farmer.id)?;
        tracing::info!(farmer_id = %farmer.id, "Registered farmer");
        Ok(farmer)
    }

    /// Log in by email. Any password is accepted.
    pub fn login(&self, email: &str) -> Result<Farmer> {
        let farmer = self.find_farmer_by_email(email)?.ok_or_else(|| {
            CropOpsError::NotFound("No farmer found with this email address".into())
        })?;
        self.set_setting(CURRENT_FARMER_KEY, &farmer.id)?;
        Ok(farmer)
    }

    pub fn logout(&self) -> Result<()> {
        self.delete_setting(CURRENT_FARMER_KEY)
    }

    pub fn current_farmer(&self) -> Result<Option<Farmer>> {
        match self.get_setting(CURRENT_FARMER_KEY)? {
            Some(id) => self.get_farmer(&id),
            None => Ok(None),
        }
    }

    pub fn get_farmer(&self, id: &str) -> Result<Option<Farmer>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT * FROM farmers WHERE id = ?1", [id], row_to_farmer)
                .optional()
                .map_err(Into::into)
        })
    }

    pub fn find_farmer_by_email(&self, email: &str) -> Result<Option<Farmer>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM farmers WHERE email = ?1",
                [email],
                row_to_farmer,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn list_farmers(&self) -> Result<Vec<Farmer>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM farmers ORDER BY created_at")?;
            let farmers = stmt
                .query_map([], row_to_farmer)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(farmers)
        })
    }

    pub fn update_farmer(&self, farmer: &Farmer) -> Result<()> {
        let updated = self.with_conn(|conn| {
            Ok(conn.execute(
                r#"
                UPDATE farmers SET
                    name = ?1, email = ?2, phone = ?3, state = ?4, district = ?5,
                    village = ?6, latitude = ?7, longitude = ?8, language = ?9,
                    farm_size = ?10, experience = ?11
                WHERE id = ?12
                "#,
                params![
                    farmer.name,
                    farmer.email,
                    farmer.phone,
                    farmer.location.state,
                    farmer.location.district,
                    farmer.location.village,
                    farmer.location.coordinates.lat,
                    farmer.location.coordinates.lng,
                    farmer.language.code(),
                    farmer.farm_size,
                    farmer.experience,
                    farmer.id,
                ],
            )?)
        })?;

        if updated == 0 {
            return Err(CropOpsError::NotFound(format!("Farmer {}", farmer.id)));
        }
        Ok(())
    }

    pub fn delete_farmer(&self, id: &str) -> Result<()> {
        let deleted =
            self.with_conn(|conn| Ok(conn.execute("DELETE FROM farmers WHERE id = ?1", [id])?))?;
        if deleted == 0 {
            return Err(CropOpsError::NotFound(format!("Farmer {}", id)));
        }

        if self.get_setting(CURRENT_FARMER_KEY)?.as_deref() == Some(id) {
            self.logout()?;
        }
        Ok(())
    }
}

fn row_to_farmer(row: &Row) -> rusqlite::Result<Farmer> {
    let language_str: String = row.get("language")?;
    let created_at_str: String = row.get("created_at")?;

    let language = Language::from_str(&language_str).unwrap_or_else(|| {
        warn!(language = %language_str, "Unknown language in database, defaulting to en");
        Language::En
    });

    Ok(Farmer {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        location: Location {
            state: row.get("state")?,
            district: row.get("district")?,
            village: row.get("village")?,
            coordinates: Coordinates {
                lat: row.get("latitude")?,
                lng: row.get("longitude")?,
            },
        },
        language,
        farm_size: row.get("farm_size")?,
        experience: row.get("experience")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Weather Cache Queries

// Degrees; about 10 m
const COORD_TOLERANCE: f64 = 1e-4;

impl Database {
    pub fn cache_weather(&self, snapshot: &WeatherSnapshot, coords: &Coordinates) -> Result<()> {
        let payload = serde_json::to_string(snapshot)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO weather_cache (latitude, longitude, source, payload, fetched_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    coords.lat,
                    coords.lng,
                    snapshot.source.as_str(),
                    payload,
                    snapshot.fetched_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    /// Most recent cached snapshot for these coordinates, marked as cached.
    pub fn latest_weather(&self, coords: &Coordinates) -> Result<Option<WeatherSnapshot>> {
        let payload: Option<String> = self.with_conn(|conn| {
            conn.query_row(
                r#"
                SELECT payload FROM weather_cache
                WHERE abs(latitude - ?1) < ?3 AND abs(longitude - ?2) < ?3
                ORDER BY fetched_at DESC, id DESC LIMIT 1
                "#,
                params![coords.lat, coords.lng, COORD_TOLERANCE],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })?;

        match payload {
            Some(json) => {
                let mut snapshot: WeatherSnapshot = serde_json::from_str(&json)?;
                snapshot.source = WeatherSource::Cached;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    /// Drop all but the newest `keep` snapshots.
    pub fn prune_weather_cache(&self, keep: u32) -> Result<usize> {
        self.with_conn(|conn| {
            Ok(conn.execute(
                r#"
                DELETE FROM weather_cache WHERE id NOT IN (
                    SELECT id FROM weather_cache ORDER BY fetched_at DESC, id DESC LIMIT ?1
                )
                "#,
                [keep],
            )?)
        })
    }
}

// Market Price Queries

impl Database {
    /// Replace the cached price list.
    pub fn cache_market_prices(&self, prices: &[MarketPrice]) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM market_prices", [])?;
            {
                let mut stmt = tx.prepare(
                    r#"
                    INSERT INTO market_prices
                        (crop_id, crop_name, price, unit, location, price_date, trend, fetched_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                )?;
                let now = Utc::now().to_rfc3339();
                for p in prices {
                    stmt.execute(params![
                        p.crop_id,
                        p.crop_name,
                        p.price,
                        p.unit.as_str(),
                        p.location,
                        p.date.format("%Y-%m-%d").to_string(),
                        p.trend.as_str(),
                        now,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
    }

    pub fn cached_market_prices(&self) -> Result<Vec<MarketPrice>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM market_prices ORDER BY id")?;
            let prices = stmt
                .query_map([], row_to_market_price)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(prices)
        })
    }
}

fn row_to_market_price(row: &Row) -> rusqlite::Result<MarketPrice> {
    let unit_str: String = row.get("unit")?;
    let trend_str: String = row.get("trend")?;
    let date_str: String = row.get("price_date")?;

    let unit = PriceUnit::from_str(&unit_str).unwrap_or_else(|| {
        warn!(unit = %unit_str, "Unknown price unit in database, defaulting to quintal");
        PriceUnit::Quintal
    });
    let trend = PriceTrend::from_str(&trend_str).unwrap_or_else(|| {
        warn!(trend = %trend_str, "Unknown price trend in database, defaulting to stable");
        PriceTrend::Stable
    });

    Ok(MarketPrice {
        crop_id: row.get("crop_id")?,
        crop_name: row.get("crop_name")?,
        price: row.get("price")?,
        unit,
        location: row.get("location")?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Local::now().date_naive()),
        trend,
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::mock;

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Lakshmi Devi".into(),
            email: email.into(),
            phone: "9123456780".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            location: Location::default(),
            farm_size: 3.0,
            experience: 8,
            language: Language::Hi,
        }
    }

    #[test]
    fn register_logs_in_new_farmer() {
        let db = Database::open_in_memory().unwrap();
        let farmer = db.register_farmer(&registration("lakshmi@example.in")).unwrap();

        let current = db.current_farmer().unwrap().unwrap();
        assert_eq!(current.id, farmer.id);
        assert_eq!(current.language, Language::Hi);
        assert_eq!(current.location, Location::default());
        assert_eq!(current.experience, 8);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.register_farmer(&registration("dup@example.in")).unwrap();
        let err = db
            .register_farmer(&registration("dup@example.in"))
            .unwrap_err();
        assert!(matches!(
            err,
            CropOpsError::Validation(ValidationError::DuplicateEmail)
        ));
        assert_eq!(db.list_farmers().unwrap().len(), 1);
    }

    #[test]
    fn invalid_registration_is_not_stored() {
        let db = Database::open_in_memory().unwrap();
        let mut reg = registration("bad@example.in");
        reg.confirm_password = "other".into();
        assert!(matches!(
            db.register_farmer(&reg),
            Err(CropOpsError::Validation(ValidationError::PasswordMismatch))
        ));
        assert!(db.list_farmers().unwrap().is_empty());
        assert!(db.current_farmer().unwrap().is_none());
    }

    #[test]
    fn login_and_logout() {
        let db = Database::open_in_memory().unwrap();
        let farmer = db.register_farmer(&registration("a@example.in")).unwrap();
        db.logout().unwrap();
        assert!(db.current_farmer().unwrap().is_none());

        let logged_in = db.login("a@example.in").unwrap();
        assert_eq!(logged_in.id, farmer.id);
        assert!(db.current_farmer().unwrap().is_some());

        assert!(matches!(
            db.login("nobody@example.in"),
            Err(CropOpsError::NotFound(_))
        ));
    }

    #[test]
    fn update_and_delete_farmer() {
        let db = Database::open_in_memory().unwrap();
        let mut farmer = db.register_farmer(&registration("u@example.in")).unwrap();

        farmer.farm_size = 7.5;
        farmer.location.district = "Gurugram".into();
        db.update_farmer(&farmer).unwrap();
        let stored = db.get_farmer(&farmer.id).unwrap().unwrap();
        assert_eq!(stored.farm_size, 7.5);
        assert_eq!(stored.location.district, "Gurugram");

        db.delete_farmer(&farmer.id).unwrap();
        assert!(db.get_farmer(&farmer.id).unwrap().is_none());
        assert!(db.current_farmer().unwrap().is_none());

        assert!(matches!(
            db.delete_farmer(&farmer.id),
            Err(CropOpsError::NotFound(_))
        ));

        assert!(matches!(
            db.update_farmer(&farmer),
            Err(CropOpsError::NotFound(_))
        ));
    }

    #[test]
    fn weather_cache_returns_latest_as_cached() {
        let db = Database::open_in_memory().unwrap();
        let coords = Location::default().coordinates;
        assert!(db.latest_weather(&coords).unwrap().is_none());

        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let mut older = mock::mock_weather(today);
        older.fetched_at = Utc::now() - chrono::Duration::hours(2);
        older.temperature_c = 20.0;
        let newer = mock::mock_weather(today);

        db.cache_weather(&older, &coords).unwrap();
        db.cache_weather(&newer, &coords).unwrap();

        let cached = db.latest_weather(&coords).unwrap().unwrap();
        assert_eq!(cached.temperature_c, 28.0);
        assert_eq!(cached.source, WeatherSource::Cached);
        assert_eq!(cached.forecast, newer.forecast);

        assert_eq!(db.prune_weather_cache(1).unwrap(), 1);
        assert_eq!(db.latest_weather(&coords).unwrap().unwrap().temperature_c, 28.0);
    }

    #[test]
    fn weather_cache_is_per_location() {
        let db = Database::open_in_memory().unwrap();
        let delhi = Location::default().coordinates;
        let ludhiana = Coordinates {
            lat: 30.9,
            lng: 75.85,
        };

        let mut snapshot = mock::mock_weather(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        snapshot.temperature_c = 34.0;
        db.cache_weather(&snapshot, &delhi).unwrap();

        assert!(db.latest_weather(&ludhiana).unwrap().is_none());
        assert_eq!(
            db.latest_weather(&delhi).unwrap().unwrap().temperature_c,
            34.0
        );
    }

    #[test]
    fn market_cache_replaces_previous_prices() {
        let db = Database::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();

        db.cache_market_prices(&mock::mock_market_prices(today))
            .unwrap();
        assert_eq!(db.cached_market_prices().unwrap().len(), 3);

        let single = vec![mock::mock_market_prices(today).remove(2)];
        db.cache_market_prices(&single).unwrap();

        let cached = db.cached_market_prices().unwrap();
        assert_eq!(cached, single);
    }

    #[test]
    fn cached_prices_keep_their_trend() {
        let db = Database::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let mut prices = mock::mock_market_prices(today);
        prices[0].trend = PriceTrend::Up;
        prices[1].trend = PriceTrend::Stable;
        prices[2].trend = PriceTrend::Down;
        db.cache_market_prices(&prices).unwrap();

        let trends: Vec<PriceTrend> = db
            .cached_market_prices()
            .unwrap()
            .iter()
            .map(|p| p.trend)
            .collect();
        assert_eq!(
            trends,
            vec![PriceTrend::Up, PriceTrend::Stable, PriceTrend::Down]
        );
    }

    #[test]
    fn settings_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_setting("missing").unwrap().is_none());
        db.set_setting("season", "rabi").unwrap();
        db.set_setting("season", "zaid").unwrap();
        assert_eq!(db.get_setting("season").unwrap().as_deref(), Some("zaid"));
        db.delete_setting("season").unwrap();
        assert!(db.get_setting("season").unwrap().is_none());
    }
}
