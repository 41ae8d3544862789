use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropOpsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Input rejected at the boundary of the scorers or the farmer registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown season '{0}' (expected kharif, rabi, zaid or all)")]
    UnknownSeason(String),

    #[error("soil type is missing or not one of clay, sandy, loamy, silty")]
    UnknownSoilType,

    #[error("weather snapshot has no forecast entries")]
    EmptyForecast,

    #[error("farm size must be a positive finite number, got {0}")]
    InvalidFarmSize(f64),

    #[error("field '{0}' is not a finite number")]
    NonFiniteField(&'static str),

    #[error("Name must be at least 2 characters long")]
    InvalidName,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid 10-digit mobile number")]
    InvalidPhone,

    #[error("Password must be at least 6 characters long")]
    WeakPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please select your location")]
    MissingLocation,

    #[error("Experience cannot be negative")]
    NegativeExperience,

    #[error("A farmer with this email already exists")]
    DuplicateEmail,
}

pub type Result<T> = std::result::Result<T, CropOpsError>;
