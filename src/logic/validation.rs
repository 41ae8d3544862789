use crate::error::ValidationError;
use crate::models::{Farmer, Location, Registration, Season, SoilSample, WeatherSnapshot};
use regex_lite::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// Indian mobile numbers: ten digits starting 6-9
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("phone pattern"));

/// Reject inputs the permissive scorer would silently under-credit.
/// Returns the parsed season on success.
pub fn validate_scoring_inputs(
    soil: &SoilSample,
    weather: &WeatherSnapshot,
    farm_size: f64,
    season: &str,
) -> Result<Season, ValidationError> {
    let season =
        Season::parse(season).ok_or_else(|| ValidationError::UnknownSeason(season.to_string()))?;

    if soil.soil_type.is_none() {
        return Err(ValidationError::UnknownSoilType);
    }

    let first_day = weather
        .forecast
        .first()
        .ok_or(ValidationError::EmptyForecast)?;

    if !farm_size.is_finite() || farm_size <= 0.0 {
        return Err(ValidationError::InvalidFarmSize(farm_size));
    }

    let fields = [
        ("soil.ph", soil.ph),
        ("soil.organic_matter_pct", soil.organic_matter_pct),
        ("weather.temperature_c", weather.temperature_c),
        ("weather.rainfall_mm", weather.rainfall_mm),
        ("weather.forecast[0].temp_max_c", first_day.temp_max_c),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteField(name));
        }
    }

    Ok(season)
}

pub fn validate_registration(reg: &Registration) -> Result<(), ValidationError> {
    check_contact(&reg.name, &reg.email, &reg.phone)?;

    if reg.password.chars().count() < 6 {
        return Err(ValidationError::WeakPassword);
    }
    if reg.password != reg.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    check_location(&reg.location)?;
    check_farm_size(reg.farm_size)?;

    if reg.experience < 0 {
        return Err(ValidationError::NegativeExperience);
    }

    Ok(())
}

/// Same field rules as registration, minus the password pair.
pub fn validate_profile(farmer: &Farmer) -> Result<(), ValidationError> {
    check_contact(&farmer.name, &farmer.email, &farmer.phone)?;
    check_location(&farmer.location)?;
    check_farm_size(farmer.farm_size)
}

fn check_contact(name: &str, email: &str, phone: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::InvalidName);
    }

    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if !PHONE_RE.is_match(&digits) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(())
}

fn check_location(location: &Location) -> Result<(), ValidationError> {
    if location.state.trim().is_empty() || location.district.trim().is_empty() {
        return Err(ValidationError::MissingLocation);
    }
    Ok(())
}

fn check_farm_size(farm_size: f64) -> Result<(), ValidationError> {
    if !farm_size.is_finite() || farm_size <= 0.0 {
        return Err(ValidationError::InvalidFarmSize(farm_size));
    }
    Ok(())
}
