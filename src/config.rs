use crate::error::{CropOpsError, Result};
use crate::logic::scorer::ScoringMode;
use crate::models::{Coordinates, Language, Location, Nutrients, SoilSample, SoilType};
use dialoguer::{Input, Password, Select};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern"));

pub const DEFAULT_MARKET_URL: &str =
    "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    #[serde(default)]
    pub soil: SoilConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    pub market: Option<MarketConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub location: Location,
    /// Acres
    pub farm_size: f64,
    /// kharif, rabi, zaid or all
    pub season: String,
    #[serde(default)]
    pub language: Language,
}

/// The farm's latest soil test. `soil_type` is free text so that textures
/// outside the four known classes can still be recorded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoilConfig {
    pub soil_type: String,
    pub ph: f64,
    pub organic_matter_pct: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub moisture_pct: f64,
}

impl SoilConfig {
    pub fn to_sample(&self) -> SoilSample {
        let soil_type = SoilType::parse(&self.soil_type);
        if soil_type.is_none() {
            tracing::warn!(
                "Unrecognised soil type '{}' - crops will earn no soil credit",
                self.soil_type
            );
        }

        SoilSample {
            soil_type,
            ph: self.ph,
            organic_matter_pct: self.organic_matter_pct,
            nutrients: Nutrients {
                nitrogen: self.nitrogen,
                phosphorus: self.phosphorus,
                potassium: self.potassium,
            },
            moisture_pct: self.moisture_pct,
        }
    }
}

impl Default for SoilConfig {
    fn default() -> Self {
        let sample = SoilSample::default();
        Self {
            soil_type: sample
                .soil_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            ph: sample.ph,
            organic_matter_pct: sample.organic_matter_pct,
            nitrogen: sample.nutrients.nitrogen,
            phosphorus: sample.nutrients.phosphorus,
            potassium: sample.nutrients.potassium,
            moisture_pct: sample.moisture_pct,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// data.gov.in daily commodity prices
#[derive(Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    pub api_key: String,
    #[serde(default = "default_market_url")]
    pub base_url: String,
    /// Restrict records to one state
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_market_url() -> String {
    DEFAULT_MARKET_URL.to_string()
}

fn default_limit() -> u32 {
    100
}

impl std::fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("state", &self.state)
            .field("limit", &self.limit)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(CropOpsError::Config(format!(
                "Config file not found at {:?}. Run `cropops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(config_path)
            .map_err(|e| CropOpsError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| CropOpsError::Config(format!("Failed to parse config: {}", e)))?;

        tracing::debug!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/cropops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropOpsError::Config("Cannot determine config directory".into()))?
            .join("cropops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(target: Option<&PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up CropOps!");
        println!();

        // --- Farm ---
        println!("Farm");
        let name: String = prompt_text("  Farm name", "My Farm")?;
        let state: String = prompt_text("  State", "Delhi")?;
        let district: String = prompt_text("  District", "New Delhi")?;
        let village: String = prompt_text("  Village", "Central Delhi")?;

        let lat: f64 = Input::new()
            .with_prompt("  Latitude")
            .default(28.6139)
            .interact_text()
            .map_err(input_error)?;
        let lng: f64 = Input::new()
            .with_prompt("  Longitude")
            .default(77.2090)
            .interact_text()
            .map_err(input_error)?;

        let farm_size: f64 = Input::new()
            .with_prompt("  Farm size (acres)")
            .default(2.0)
            .interact_text()
            .map_err(input_error)?;

        let seasons = ["kharif", "rabi", "zaid", "all"];
        let season_idx = Select::new()
            .with_prompt("  Current season")
            .items(&seasons)
            .default(0)
            .interact()
            .map_err(input_error)?;

        let languages = [Language::En, Language::Hi, Language::Pa, Language::Regional];
        let language_names: Vec<&str> = languages.iter().map(|l| l.native_name()).collect();
        let language_idx = Select::new()
            .with_prompt("  Language")
            .items(&language_names)
            .default(0)
            .interact()
            .map_err(input_error)?;

        println!();

        // --- Soil test ---
        println!("Soil test (defaults are a typical loam)");
        let defaults = SoilConfig::default();
        let soil = SoilConfig {
            soil_type: prompt_text("  Soil type (clay, sandy, loamy, silty)", &defaults.soil_type)?,
            ph: prompt_number("  pH", defaults.ph)?,
            organic_matter_pct: prompt_number("  Organic matter (%)", defaults.organic_matter_pct)?,
            nitrogen: prompt_number("  Nitrogen (ppm)", defaults.nitrogen)?,
            phosphorus: prompt_number("  Phosphorus (ppm)", defaults.phosphorus)?,
            potassium: prompt_number("  Potassium (ppm)", defaults.potassium)?,
            moisture_pct: prompt_number("  Moisture (%)", defaults.moisture_pct)?,
        };

        println!();

        // --- OpenWeatherMap (optional) ---
        println!("OpenWeatherMap (leave API key blank to use offline weather)");
        let owm_api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                enabled: true,
            })
        };

        println!();

        // --- Market prices (optional) ---
        println!("data.gov.in market prices (leave API key blank to use offline prices)");
        let market_api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        let market = if market_api_key.is_empty() {
            None
        } else {
            Some(MarketConfig {
                api_key: market_api_key,
                base_url: default_market_url(),
                state: Some(state.clone()),
                limit: default_limit(),
                enabled: true,
            })
        };

        println!();

        let config = Config {
            farm: FarmConfig {
                name,
                location: Location {
                    state,
                    district,
                    village,
                    coordinates: Coordinates { lat, lng },
                },
                farm_size,
                season: seasons[season_idx].to_string(),
                language: languages[language_idx],
            },
            soil,
            scoring: ScoringConfig::default(),
            openweathermap,
            market,
        };

        let config_path = match target {
            Some(p) => p.clone(),
            None => Self::default_config_path()?,
        };
        config.save(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    /// Write the config as YAML with a header comment.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CropOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# CropOps Configuration\n# Generated by `cropops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        for cap in ENV_VAR_RE.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn soil_sample(&self) -> SoilSample {
        self.soil.to_sample()
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("CROPOPS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| CropOpsError::Config("Cannot determine data directory".into()))?
            .join("cropops");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("cropops.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "My Farm".into(),
                location: Location::default(),
                farm_size: 2.0,
                season: "kharif".into(),
                language: Language::En,
            },
            soil: SoilConfig::default(),
            scoring: ScoringConfig::default(),
            openweathermap: None,
            market: None,
        }
    }
}

fn input_error(e: dialoguer::Error) -> CropOpsError {
    CropOpsError::Config(format!("Input error: {}", e))
}

fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .map_err(input_error)
}

fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    Input::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(input_error)
}
