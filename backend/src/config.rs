//! Configuration management for the AgroClima backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRO__ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{EstimatorConfig, Language};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Remote farm API
    pub api: ApiConfig,

    /// Plant and pest prediction service
    pub prediction: PredictionConfig,

    /// Weather and geocoding services
    pub weather: WeatherConfig,

    /// JWT session configuration
    pub jwt: JwtConfig,

    /// Dashboard estimators
    pub dashboard: DashboardConfig,

    /// Log output
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the farm REST API, with trailing slash
    pub base_url: String,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    /// Base URL of the prediction service
    pub base_url: String,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Open-Meteo forecast endpoint
    pub forecast_url: String,

    /// Nominatim reverse geocoding endpoint
    pub reverse_geocode_url: String,

    /// City used when a request names none
    pub default_city: String,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing session tokens
    pub secret: String,

    /// Session token expiration in seconds
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Hectares attributed to each crop
    pub area_per_crop: Decimal,

    /// Tonnes attributed to each crop
    pub yield_per_crop: Decimal,

    /// Price per tonne
    pub price_per_ton: Decimal,

    /// Language of month labels and fallback group names
    pub language: Language,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable logs
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("api.base_url", "https://proyecto-agroclima-api.onrender.com/")?
            .set_default("api.timeout_secs", 15)?
            .set_default("prediction.base_url", "https://proyecto-agroclima-api-ia.onrender.com/ia")?
            .set_default("prediction.timeout_secs", 60)?
            .set_default(
                "weather.forecast_url",
                "https://api.open-meteo.com/v1/forecast",
            )?
            .set_default(
                "weather.reverse_geocode_url",
                "https://nominatim.openstreetmap.org/reverse",
            )?
            .set_default("weather.default_city", shared::DEFAULT_CITY)?
            .set_default("weather.timeout_secs", 10)?
            .set_default("jwt.secret", "change-me-in-production")?
            .set_default("jwt.access_token_expiry", 86400)?
            .set_default("dashboard.area_per_crop", "1.5")?
            .set_default("dashboard.yield_per_crop", "10")?
            .set_default("dashboard.price_per_ton", "150")?
            .set_default("dashboard.language", "english")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRO__ prefix)
            .add_source(
                Environment::with_prefix("AGRO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Estimator used by the dashboard aggregator
    pub fn estimator(&self) -> EstimatorConfig {
        EstimatorConfig {
            area_per_crop: self.dashboard.area_per_crop,
            yield_per_crop: self.dashboard.yield_per_crop,
            price_per_ton: self.dashboard.price_per_ton,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PredictionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
