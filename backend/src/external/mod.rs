//! External API integrations

pub mod farm_api;
pub mod prediction;
pub mod weather;

pub use farm_api::FarmApiClient;
pub use prediction::PredictionClient;
pub use weather::WeatherClient;
