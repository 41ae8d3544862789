pub mod crops;
pub mod dashboard;
pub mod market;
pub mod soil;
pub mod weather;

pub use crops::CropsScreen;
pub use dashboard::DashboardScreen;
pub use market::MarketScreen;
pub use soil::SoilScreen;
pub use weather::WeatherScreen;
