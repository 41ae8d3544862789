use crate::config::Config;
use crate::datasources::mock;
use crate::db::Database;
use crate::error::Result;
use crate::logic::catalog::crop_catalog;
use crate::logic::fertilizer::fertilizer_plan;
use crate::logic::soil_health::analyze_soil_health;
use crate::logic::{CropScorer, RulesEngine};
use crate::models::{
    Advisory, CropRecommendation, Farmer, FertilizerPlan, Language, Location, MarketPrice,
    Season, SoilHealthReport, SoilSample, WeatherSnapshot,
};
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Weather,
    Crops,
    Soil,
    Market,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Weather),
            '3' => Some(Screen::Crops),
            '4' => Some(Screen::Soil),
            '5' => Some(Screen::Market),
            _ => None,
        }
    }
}

/// Cursor into a list screen.
#[derive(Debug, Default)]
pub struct SelectionState {
    pub selected_index: usize,
}

impl SelectionState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected_index = 0;
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Inputs
    pub farmer: Option<Farmer>,
    pub location: Location,
    pub soil: SoilSample,
    pub farm_size: f64,
    pub season: String,
    pub weather: WeatherSnapshot,
    pub market_prices: Vec<MarketPrice>,

    // Derived
    pub recommendations: Vec<CropRecommendation>,
    pub scoring_error: Option<String>,
    pub soil_report: SoilHealthReport,
    pub fertilizer_plan: FertilizerPlan,
    pub advisories: Vec<Advisory>,

    // Screen states
    pub crops_state: SelectionState,
    pub market_state: SelectionState,

    // Services
    pub rules_engine: RulesEngine,

    // UI state
    pub status_message: Option<String>,
    pub refreshing: bool,
    pub needs_refresh: bool,
}

impl App {
    /// Builds the initial state from config, the signed-in farmer and whatever
    /// the caches hold. No network access happens here.
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let today = Self::today();
        let farmer = db.current_farmer()?;

        // A signed-in farmer's own farm takes precedence over the config defaults
        let (location, farm_size) = match &farmer {
            Some(f) => (f.location.clone(), f.farm_size),
            None => (config.farm.location.clone(), config.farm.farm_size),
        };

        let weather = match db.latest_weather(&location.coordinates)? {
            Some(cached) => cached,
            None => mock::mock_weather(today),
        };

        let market_prices = match db.cached_market_prices()? {
            cached if !cached.is_empty() => cached,
            _ => mock::mock_market_prices(today),
        };

        let soil = config.soil_sample();
        let soil_report = analyze_soil_health(&soil);
        let fertilizer_plan = fertilizer_plan(&soil, farm_size);
        let season = config.farm.season.clone();

        let mut app = Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            db,
            farmer,
            location,
            soil,
            farm_size,
            season,
            weather,
            market_prices,
            recommendations: Vec::new(),
            scoring_error: None,
            soil_report,
            fertilizer_plan,
            advisories: Vec::new(),
            crops_state: SelectionState::new(),
            market_state: SelectionState::new(),
            rules_engine: RulesEngine::new(),
            status_message: None,
            refreshing: false,
            needs_refresh: false,
        };
        app.recompute();

        Ok(app)
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Re-derive everything computed from the current inputs.
    pub fn recompute(&mut self) {
        let scorer = CropScorer::new(crop_catalog(), self.config.scoring.mode);
        match scorer.recommend(
            &self.location,
            &self.soil,
            &self.weather,
            self.farm_size,
            &self.season,
            Self::today(),
        ) {
            Ok(recs) => {
                self.recommendations = recs;
                self.scoring_error = None;
            }
            Err(e) => {
                self.recommendations = Vec::new();
                self.scoring_error = Some(e.to_string());
            }
        }
        self.crops_state.reset();

        self.soil_report = analyze_soil_health(&self.soil);
        self.fertilizer_plan = fertilizer_plan(&self.soil, self.farm_size);
        self.advisories = self.rules_engine.evaluate(&self.weather);
    }

    pub fn update_weather(&mut self, weather: WeatherSnapshot) {
        self.weather = weather;
        self.recompute();
    }

    pub fn update_market(&mut self, prices: Vec<MarketPrice>) {
        self.market_prices = prices;
        self.market_state.reset();
    }

    /// kharif → rabi → zaid → all → kharif. An unrecognised season restarts at kharif.
    pub fn cycle_season(&mut self) {
        let next = match Season::parse(&self.season) {
            Some(Season::Kharif) => Season::Rabi,
            Some(Season::Rabi) => Season::Zaid,
            Some(Season::Zaid) => Season::All,
            Some(Season::All) | None => Season::Kharif,
        };
        self.season = next.as_str().to_string();
        self.recompute();
        self.set_status(&format!("Season: {}", next.label()));
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing data...");
    }

    pub fn language(&self) -> Language {
        self.farmer
            .as_ref()
            .map(|f| f.language)
            .unwrap_or(self.config.farm.language)
    }

    pub fn farm_label(&self) -> String {
        match &self.farmer {
            Some(f) => format!("{} - {}", f.name, self.location.label()),
            None => format!("{} - {}", self.config.farm.name, self.location.label()),
        }
    }

    pub fn alerts(&self) -> Vec<&Advisory> {
        self.advisories
            .iter()
            .filter(|a| a.category.is_alert())
            .collect()
    }
}
