//! Weather-driven agronomic recommendations
//!
//! Rules only look at the current temperature and sky condition. At most
//! [`MAX_RECOMMENDATIONS`] tips are returned, temperature advisories first.

use rust_decimal::Decimal;

use crate::models::{ClimateReport, SkyGroup, WeatherCondition};
use crate::types::{GpsCoordinates, Language};

pub const MAX_RECOMMENDATIONS: usize = 3;

/// City used when the caller gives no location or an unknown one
pub const DEFAULT_CITY: &str = "Barranquilla, Atlántico";

const HOT_ABOVE_CELSIUS: f64 = 35.0;
const COLD_BELOW_CELSIUS: f64 = 15.0;

/// Predefined cities as (name, latitude, longitude) in hundredths of a degree
const CITIES: &[(&str, i64, i64)] = &[
    ("Cartagena, Bolívar", 1039, -7551),
    ("Magangué, Bolívar", 924, -7475),
    ("Barranquilla, Atlántico", 1096, -7478),
    ("El Carmen de Bolívar, Bolívar", 972, -7512),
    ("Santa Marta, Magdalena", 1124, -7421),
    ("Montería, Córdoba", 875, -7588),
    ("Sincelejo, Sucre", 930, -7540),
];

/// Names of the predefined cities
pub fn known_cities() -> impl Iterator<Item = &'static str> {
    CITIES.iter().map(|(name, _, _)| *name)
}

/// Coordinates of a predefined city. The name matches with or without its
/// department (`"Montería"` or `"Montería, Córdoba"`), ignoring case.
/// Unknown names resolve to [`DEFAULT_CITY`].
pub fn city_coordinates(name: &str) -> GpsCoordinates {
    let wanted = name.trim().to_lowercase();
    let found = CITIES.iter().find(|(city, _, _)| {
        let city = city.to_lowercase();
        city == wanted || city.split(',').next().map(str::trim) == Some(wanted.as_str())
    });

    let (_, lat, lon) = match found {
        Some(entry) => *entry,
        None => CITIES[2],
    };
    GpsCoordinates::new(Decimal::new(lat, 2), Decimal::new(lon, 2))
}

fn tip(language: Language, en: &str, es: &str) -> String {
    language.pick(en, es).to_string()
}

/// Agronomic advice for the current conditions
pub fn recommendations(
    condition: WeatherCondition,
    temperature_celsius: f64,
    language: Language,
) -> Vec<String> {
    let mut tips = Vec::new();

    if temperature_celsius > HOT_ABOVE_CELSIUS {
        tips.push(tip(
            language,
            "🌡️ Very high temperature: irrigate more often",
            "🌡️ Temperatura muy alta: aumentar frecuencia de riego",
        ));
        tips.push(tip(
            language,
            "☀️ Protect sensitive crops with shade netting",
            "☀️ Proteger cultivos sensibles con mallas de sombra",
        ));
    } else if temperature_celsius < COLD_BELOW_CELSIUS {
        tips.push(tip(
            language,
            "❄️ Low temperature: protect cold-sensitive crops",
            "❄️ Temperatura baja: proteger cultivos sensibles al frío",
        ));
    }

    match condition.group() {
        SkyGroup::Sunny => {
            tips.push(tip(
                language,
                "🌱 Irrigate early (6-8 AM) to limit evaporation",
                "🌱 Regar temprano (6-8 AM) para evitar evaporación",
            ));
            tips.push(tip(
                language,
                "💧 Keep young seedlings shaded",
                "💧 Mantener sombra en plántulas jóvenes",
            ));
            if tips.len() < MAX_RECOMMENDATIONS {
                tips.push(tip(
                    language,
                    "🌾 Good time to apply foliar treatments",
                    "🌾 Buen momento para aplicar tratamientos foliares",
                ));
            }
        }
        SkyGroup::Wet | SkyGroup::Stormy => {
            tips.push(tip(
                language,
                "💦 Make sure every field drains well",
                "💦 Asegurar buen drenaje en todos los cultivos",
            ));
            tips.push(tip(
                language,
                "🌧️ Suspend irrigation and foliar fertilization",
                "🌧️ Suspender riego y fertilización foliar",
            ));
            tips.push(tip(
                language,
                "🚜 Avoid fieldwork during heavy rain",
                "🚜 Evitar labores en el campo durante lluvia intensa",
            ));
        }
        SkyGroup::Cloudy => {
            tips.push(tip(
                language,
                "🌤️ Ideal conditions for fieldwork",
                "🌤️ Condiciones ideales para labores de campo",
            ));
            tips.push(tip(
                language,
                "💧 Check soil moisture before irrigating",
                "💧 Revisar humedad del suelo antes de regar",
            ));
            tips.push(tip(
                language,
                "🌾 Watch for fungus caused by humidity",
                "🌾 Monitorear aparición de hongos por humedad",
            ));
        }
        SkyGroup::Drizzle
        | SkyGroup::Showers
        | SkyGroup::Foggy
        | SkyGroup::Snowy
        | SkyGroup::Unsettled => {}
    }

    if tips.is_empty() {
        tips.push(tip(
            language,
            "👨‍🌾 Keep monitoring the weather",
            "👨‍🌾 Mantener monitoreo constante del clima",
        ));
        tips.push(tip(
            language,
            "🌿 Adjust irrigation to current conditions",
            "🌿 Ajustar riego según condiciones actuales",
        ));
        tips.push(tip(
            language,
            "⚙️ Check irrigation equipment",
            "⚙️ Verificar equipos de irrigación",
        ));
    }

    tips.truncate(MAX_RECOMMENDATIONS);
    tips
}

impl ClimateReport {
    /// Build a report from raw readings. Readings are rounded to whole units.
    pub fn from_readings(
        city: impl Into<String>,
        temperature_celsius: f64,
        humidity_percent: f64,
        wind_speed_kmh: f64,
        condition: WeatherCondition,
        language: Language,
    ) -> Self {
        Self {
            temperature_celsius: round_reading(temperature_celsius),
            humidity_percent: round_reading(humidity_percent),
            wind_speed_kmh: round_reading(wind_speed_kmh),
            condition,
            description: condition.description(language).to_string(),
            icon: condition.icon().to_string(),
            recommendations: recommendations(condition, temperature_celsius, language),
            city: city.into(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: GpsCoordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Report served when the weather service cannot be reached
    pub fn fallback(city: impl Into<String>, language: Language) -> Self {
        let condition = WeatherCondition::PartlyCloudy;
        Self {
            temperature_celsius: 30,
            humidity_percent: 70,
            wind_speed_kmh: 10,
            condition,
            description: condition.description(language).to_string(),
            icon: condition.icon().to_string(),
            recommendations: vec![
                tip(
                    language,
                    "🌱 Irrigate early in the morning or at dusk",
                    "🌱 Regar temprano en la mañana o al atardecer",
                ),
                tip(
                    language,
                    "☀️ Protect sensitive crops from direct sun",
                    "☀️ Proteger cultivos sensibles del sol directo",
                ),
                tip(
                    language,
                    "💧 Keep soil moisture constant",
                    "💧 Mantener humedad del suelo constante",
                ),
            ],
            city: city.into(),
            coordinates: None,
        }
    }
}

/// Round half up, matching how the weather widget displays readings
fn round_reading(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_advisories_come_first() {
        let tips = recommendations(WeatherCondition::Clear, 37.0, Language::English);
        assert_eq!(tips.len(), 3);
        assert!(tips[0].contains("Very high temperature"));
        assert!(tips[1].contains("shade netting"));
        assert!(tips[2].contains("Irrigate early"));
    }

    #[test]
    fn test_clear_sky_gets_foliar_tip_when_room() {
        let tips = recommendations(WeatherCondition::MainlyClear, 28.0, Language::Spanish);
        assert_eq!(
            tips,
            vec![
                "🌱 Regar temprano (6-8 AM) para evitar evaporación",
                "💧 Mantener sombra en plántulas jóvenes",
                "🌾 Buen momento para aplicar tratamientos foliares",
            ]
        );
    }

    #[test]
    fn test_wet_conditions() {
        for condition in [
            WeatherCondition::LightRain,
            WeatherCondition::HeavyRain,
            WeatherCondition::IsolatedShowers,
            WeatherCondition::Thunderstorm,
        ] {
            let tips = recommendations(condition, 25.0, Language::English);
            assert!(tips[0].contains("drains well"), "{:?}", condition);
        }
    }

    #[test]
    fn test_drizzle_and_showers_get_general_tips() {
        for code in [51, 53, 55, 81, 82] {
            let tips = recommendations(WeatherCondition::from_wmo_code(code), 25.0, Language::Spanish);
            assert_eq!(
                tips,
                vec![
                    "👨‍🌾 Mantener monitoreo constante del clima",
                    "🌿 Ajustar riego según condiciones actuales",
                    "⚙️ Verificar equipos de irrigación",
                ],
                "code {}",
                code
            );
        }

        let isolated = recommendations(WeatherCondition::from_wmo_code(80), 25.0, Language::Spanish);
        assert_eq!(isolated[0], "💦 Asegurar buen drenaje en todos los cultivos");
    }

    #[test]
    fn test_cold_and_cloudy_truncates() {
        let tips = recommendations(WeatherCondition::Overcast, 10.0, Language::English);
        assert_eq!(tips.len(), 3);
        assert!(tips[0].contains("Low temperature"));
        assert!(tips[2].contains("soil moisture"));
    }

    #[test]
    fn test_general_tips_when_nothing_applies() {
        let tips = recommendations(WeatherCondition::Fog, 22.0, Language::English);
        assert_eq!(tips.len(), 3);
        assert!(tips[0].contains("monitoring the weather"));

        let cold_fog = recommendations(WeatherCondition::Fog, 5.0, Language::English);
        assert_eq!(cold_fog.len(), 1);
    }

    #[test]
    fn test_city_lookup() {
        let monteria = city_coordinates("Montería, Córdoba");
        assert_eq!(monteria.latitude, Decimal::new(875, 2));
        assert_eq!(monteria.longitude, Decimal::new(-7588, 2));

        assert_eq!(city_coordinates("sincelejo"), city_coordinates("Sincelejo, Sucre"));
        assert_eq!(city_coordinates("Bogotá"), city_coordinates(DEFAULT_CITY));
        assert_eq!(known_cities().count(), 7);
    }

    #[test]
    fn test_fallback_report() {
        let report = ClimateReport::fallback("Sincelejo, Sucre", Language::Spanish);
        assert_eq!(report.temperature_celsius, 30);
        assert_eq!(report.humidity_percent, 70);
        assert_eq!(report.wind_speed_kmh, 10);
        assert_eq!(report.description, "Parcialmente nublado");
        assert_eq!(report.icon, "⛅");
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(report.city, "Sincelejo, Sucre");
    }

    #[test]
    fn test_report_from_readings() {
        let report = ClimateReport::from_readings(
            "Cartagena, Bolívar",
            31.5,
            78.2,
            12.4,
            WeatherCondition::from_wmo_code(2),
            Language::English,
        )
        .with_coordinates(city_coordinates("Cartagena"));
        assert_eq!(report.temperature_celsius, 32);
        assert_eq!(report.humidity_percent, 78);
        assert_eq!(report.wind_speed_kmh, 12);
        assert_eq!(report.description, "Partly cloudy");
        assert!(report.coordinates.is_some());
    }
}
