//! Weather API client for fetching current conditions
//!
//! Integrates with Open-Meteo for current weather and Nominatim
//! (OpenStreetMap) for reverse geocoding. Neither service needs an API key.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::WeatherCondition;

use crate::error::{AppError, AppResult};

/// Humidity reported when the hourly series is missing
const DEFAULT_HUMIDITY_PERCENT: f64 = 70.0;

/// Label used when reverse geocoding finds no place name
pub const UNKNOWN_PLACE: &str = "Ubicación actual";

const USER_AGENT: &str = "AgroClima/1.0";

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    forecast_url: String,
    reverse_geocode_url: String,
}

/// Current conditions at a point
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
    pub wind_speed_kmh: f64,
    pub condition: WeatherCondition,
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct OMForecastResponse {
    current_weather: OMCurrentWeather,
    hourly: Option<OMHourly>,
}

#[derive(Debug, Deserialize)]
struct OMCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u16,
}

#[derive(Debug, Deserialize)]
struct OMHourly {
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
}

/// Nominatim reverse geocoding response
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(
        forecast_url: impl Into<String>,
        reverse_geocode_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            forecast_url: forecast_url.into(),
            reverse_geocode_url: reverse_geocode_url.into(),
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<CurrentWeather> {
        let url = format!(
            "{}?latitude={}&longitude={}&current_weather=true&hourly=relative_humidity_2m",
            self.forecast_url, latitude, longitude
        );
        tracing::debug!("Fetching weather: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::from_reqwest("weather service", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                message: format!("Weather API error: {}", body),
            });
        }

        let data: OMForecastResponse = response.json().await.map_err(|e| {
            AppError::UpstreamResponse(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_forecast_response(data))
    }

    /// Name of the place at the given coordinates, in Spanish where available.
    /// Falls back to [`UNKNOWN_PLACE`] on any failure.
    pub async fn reverse_geocode(&self, latitude: Decimal, longitude: Decimal) -> String {
        let url = format!(
            "{}?format=json&lat={}&lon={}&accept-language=es",
            self.reverse_geocode_url, latitude, longitude
        );

        let result = async {
            self.client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<NominatimResponse>()
                .await
        }
        .await;

        match result {
            Ok(data) => place_name(data),
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                UNKNOWN_PLACE.to_string()
            }
        }
    }
}

/// Convert the Open-Meteo response to our format
fn convert_forecast_response(data: OMForecastResponse) -> CurrentWeather {
    let humidity = data
        .hourly
        .and_then(|h| h.relative_humidity_2m.into_iter().next().flatten())
        .unwrap_or(DEFAULT_HUMIDITY_PERCENT);

    CurrentWeather {
        temperature_celsius: data.current_weather.temperature,
        humidity_percent: humidity,
        wind_speed_kmh: data.current_weather.windspeed,
        condition: WeatherCondition::from_wmo_code(data.current_weather.weathercode),
    }
}

/// Most specific place name in a geocoding result
fn place_name(data: NominatimResponse) -> String {
    data.address
        .and_then(|a| a.city.or(a.town).or(a.village).or(a.state))
        .unwrap_or_else(|| UNKNOWN_PLACE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_conversion() {
        let data: OMForecastResponse = serde_json::from_str(
            r#"{
                "latitude": 10.96,
                "longitude": -74.78,
                "current_weather": {"temperature": 31.4, "windspeed": 14.2, "winddirection": 40, "weathercode": 3, "time": "2025-06-01T12:00"},
                "hourly": {"time": ["2025-06-01T00:00"], "relative_humidity_2m": [82]}
            }"#,
        )
        .unwrap();

        let current = convert_forecast_response(data);
        assert_eq!(current.temperature_celsius, 31.4);
        assert_eq!(current.humidity_percent, 82.0);
        assert_eq!(current.wind_speed_kmh, 14.2);
        assert_eq!(current.condition, WeatherCondition::Overcast);
    }

    #[test]
    fn test_missing_humidity_defaults() {
        let data: OMForecastResponse = serde_json::from_str(
            r#"{"current_weather": {"temperature": 20.0, "windspeed": 3.0, "weathercode": 61}}"#,
        )
        .unwrap();
        let current = convert_forecast_response(data);
        assert_eq!(current.humidity_percent, DEFAULT_HUMIDITY_PERCENT);
        assert_eq!(current.condition, WeatherCondition::LightRain);
    }

    #[test]
    fn test_place_name_precedence() {
        let town: NominatimResponse = serde_json::from_str(
            r#"{"address": {"town": "Magangué", "state": "Bolívar"}}"#,
        )
        .unwrap();
        assert_eq!(place_name(town), "Magangué");

        let state: NominatimResponse =
            serde_json::from_str(r#"{"address": {"state": "Sucre"}}"#).unwrap();
        assert_eq!(place_name(state), "Sucre");

        let nothing: NominatimResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(place_name(nothing), UNKNOWN_PLACE);
    }
}
