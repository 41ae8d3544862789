pub mod gauge;
pub mod nav;

pub use gauge::{humidity_gauge, rainfall_gauge, soil_score_gauge, temperature_gauge, wind_gauge};
pub use nav::nav_bar;
