//! Climate service: current weather plus agronomic recommendations
//!
//! Never fails on collaborator errors. When the weather service cannot be
//! used the caller gets the fallback report for the requested city.

use shared::{city_coordinates, ClimateReport, GpsCoordinates, Language};

use crate::external::WeatherClient;

#[derive(Clone)]
pub struct ClimateService {
    weather: WeatherClient,
    default_city: String,
    language: Language,
}

/// Where to report the weather for
#[derive(Debug, Clone, Default)]
pub struct ClimateQuery {
    pub coordinates: Option<GpsCoordinates>,
    pub city: Option<String>,
}

impl ClimateService {
    pub fn new(weather: WeatherClient, default_city: impl Into<String>, language: Language) -> Self {
        Self {
            weather,
            default_city: default_city.into(),
            language,
        }
    }

    /// Current conditions for coordinates, a named city, or the default city
    pub async fn current(&self, query: ClimateQuery) -> ClimateReport {
        let city = query
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let (city, coordinates) = match (query.coordinates, city) {
            (Some(coordinates), Some(city)) => (city, coordinates),
            (Some(coordinates), None) => {
                let city = self
                    .weather
                    .reverse_geocode(coordinates.latitude, coordinates.longitude)
                    .await;
                (city, coordinates)
            }
            (None, city) => {
                let city = city.unwrap_or_else(|| self.default_city.clone());
                let coordinates = city_coordinates(&city);
                (city, coordinates)
            }
        };

        match self
            .weather
            .get_current_weather(coordinates.latitude, coordinates.longitude)
            .await
        {
            Ok(current) => ClimateReport::from_readings(
                city,
                current.temperature_celsius,
                current.humidity_percent,
                current.wind_speed_kmh,
                current.condition,
                self.language,
            )
            .with_coordinates(coordinates),
            Err(e) => {
                tracing::warn!("Weather unavailable for {}, using fallback: {}", city, e);
                ClimateReport::fallback(city, self.language).with_coordinates(coordinates)
            }
        }
    }
}
