//! HTTP handler for current weather

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{validate_coordinates, ClimateReport, GpsCoordinates, Language};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::climate::ClimateQuery;
use crate::services::ClimateService;
use crate::AppState;

/// Query parameters for the weather endpoint
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub lang: Option<Language>,
}

impl WeatherQuery {
    /// Coordinates, when both are given
    fn coordinates(&self) -> AppResult<Option<GpsCoordinates>> {
        let (lat, lon) = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            (None, None) => return Ok(None),
            _ => {
                return Err(AppError::Validation {
                    field: "lat".to_string(),
                    message: "Both lat and lon are required".to_string(),
                    message_es: "Se requieren lat y lon".to_string(),
                })
            }
        };

        let to_decimal = |field: &str, value: f64| {
            Decimal::try_from(value)
                .map_err(|_| AppError::invalid_field(field, "Coordinate is not a number"))
        };
        let coordinates = GpsCoordinates::new(to_decimal("lat", lat)?, to_decimal("lon", lon)?);
        validate_coordinates(&coordinates).map_err(|m| AppError::invalid_field("coordinates", m))?;
        Ok(Some(coordinates))
    }
}

/// Current weather and recommendations
pub async fn get_current_weather(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<ClimateReport>> {
    let coordinates = query.coordinates()?;
    let language = query.lang.unwrap_or(state.config.dashboard.language);

    let service = ClimateService::new(
        state.weather,
        state.config.weather.default_city.clone(),
        language,
    );
    let report = service
        .current(ClimateQuery {
            coordinates,
            city: query.city,
        })
        .await;
    Ok(Json(report))
}
