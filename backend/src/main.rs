//! AgroClima Platform - Backend Server
//!
//! Backend-for-frontend for the AgroClima farm client: sessions, crops,
//! dashboard statistics, generated tasks, weather recommendations and
//! plant/pest predictions.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod middleware;
mod routes;
mod services;

pub use config::Config;

use external::{FarmApiClient, PredictionClient, WeatherClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub farm_api: FarmApiClient,
    pub weather: WeatherClient,
    pub prediction: PredictionClient,
}

impl AppState {
    /// Build the HTTP clients for every collaborator
    pub fn new(config: Config) -> error::AppResult<Self> {
        let farm_api = FarmApiClient::new(config.api.base_url.clone(), config.api.timeout())?;
        let weather = WeatherClient::new(
            config.weather.forecast_url.clone(),
            config.weather.reverse_geocode_url.clone(),
            config.weather.timeout(),
        )?;
        let prediction =
            PredictionClient::new(config.prediction.base_url.clone(), config.prediction.timeout())?;

        Ok(Self {
            config: Arc::new(config),
            farm_api,
            weather,
            prediction,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    // Initialize tracing
    let json_logs = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agroclima_server=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting AgroClima Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Farm API: {}", config.api.base_url);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(DefaultBodyLimit::max(services::prediction::MAX_IMAGE_BYTES + 64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgroClima Platform API v1.0"
}
