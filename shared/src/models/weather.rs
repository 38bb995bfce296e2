//! Weather models

use serde::{Deserialize, Serialize};

use crate::types::{GpsCoordinates, Language};

/// Current conditions and agronomic advice for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateReport {
    pub temperature_celsius: i32,
    pub humidity_percent: i32,
    pub wind_speed_kmh: i32,
    pub condition: WeatherCondition,
    pub description: String,
    pub icon: String,
    pub recommendations: Vec<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GpsCoordinates>,
}

/// Weather condition from a WMO weather interpretation code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    LightDrizzle,
    ModerateDrizzle,
    DenseDrizzle,
    LightRain,
    ModerateRain,
    HeavyRain,
    LightSnow,
    ModerateSnow,
    HeavySnow,
    IsolatedShowers,
    ModerateShowers,
    ViolentShowers,
    Thunderstorm,
    ThunderstormLightHail,
    ThunderstormHeavyHail,
    /// Any code outside the table
    Variable,
}

/// Coarse grouping used to pick recommendations and icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyGroup {
    Sunny,
    Cloudy,
    Wet,
    /// Drizzle: rain icon, but only the general advice
    Drizzle,
    /// Moderate and violent showers: general advice and icon
    Showers,
    Stormy,
    Foggy,
    Snowy,
    Unsettled,
}

impl WeatherCondition {
    pub fn from_wmo_code(code: u16) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1 => WeatherCondition::MainlyClear,
            2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Overcast,
            45 => WeatherCondition::Fog,
            48 => WeatherCondition::RimeFog,
            51 => WeatherCondition::LightDrizzle,
            53 => WeatherCondition::ModerateDrizzle,
            55 => WeatherCondition::DenseDrizzle,
            61 => WeatherCondition::LightRain,
            63 => WeatherCondition::ModerateRain,
            65 => WeatherCondition::HeavyRain,
            71 => WeatherCondition::LightSnow,
            73 => WeatherCondition::ModerateSnow,
            75 => WeatherCondition::HeavySnow,
            80 => WeatherCondition::IsolatedShowers,
            81 => WeatherCondition::ModerateShowers,
            82 => WeatherCondition::ViolentShowers,
            95 => WeatherCondition::Thunderstorm,
            96 => WeatherCondition::ThunderstormLightHail,
            99 => WeatherCondition::ThunderstormHeavyHail,
            _ => WeatherCondition::Variable,
        }
    }

    pub fn group(&self) -> SkyGroup {
        use WeatherCondition::*;
        match self {
            Clear | MainlyClear => SkyGroup::Sunny,
            PartlyCloudy | Overcast => SkyGroup::Cloudy,
            LightRain | ModerateRain | HeavyRain | IsolatedShowers => SkyGroup::Wet,
            LightDrizzle | ModerateDrizzle | DenseDrizzle => SkyGroup::Drizzle,
            ModerateShowers | ViolentShowers => SkyGroup::Showers,
            Thunderstorm | ThunderstormLightHail | ThunderstormHeavyHail => SkyGroup::Stormy,
            Fog | RimeFog => SkyGroup::Foggy,
            LightSnow | ModerateSnow | HeavySnow => SkyGroup::Snowy,
            Variable => SkyGroup::Unsettled,
        }
    }

    pub fn description(&self, language: Language) -> &'static str {
        use WeatherCondition::*;
        let (en, es) = match self {
            Clear => ("Clear sky", "Despejado"),
            MainlyClear => ("Mainly clear", "Mayormente despejado"),
            PartlyCloudy => ("Partly cloudy", "Parcialmente nublado"),
            Overcast => ("Overcast", "Nublado"),
            Fog => ("Fog", "Niebla"),
            RimeFog => ("Depositing rime fog", "Niebla con escarcha"),
            LightDrizzle => ("Light drizzle", "Llovizna ligera"),
            ModerateDrizzle => ("Moderate drizzle", "Llovizna moderada"),
            DenseDrizzle => ("Dense drizzle", "Llovizna intensa"),
            LightRain => ("Light rain", "Lluvia ligera"),
            ModerateRain => ("Moderate rain", "Lluvia moderada"),
            HeavyRain => ("Heavy rain", "Lluvia fuerte"),
            LightSnow => ("Light snowfall", "Nevada ligera"),
            ModerateSnow => ("Moderate snowfall", "Nevada moderada"),
            HeavySnow => ("Heavy snowfall", "Nevada intensa"),
            IsolatedShowers => ("Isolated showers", "Lluvias aisladas"),
            ModerateShowers => ("Moderate showers", "Chubascos moderados"),
            ViolentShowers => ("Violent showers", "Chubascos violentos"),
            Thunderstorm => ("Thunderstorm", "Tormenta"),
            ThunderstormLightHail => ("Thunderstorm with light hail", "Tormenta con granizo ligero"),
            ThunderstormHeavyHail => ("Thunderstorm with heavy hail", "Tormenta con granizo fuerte"),
            Variable => ("Variable weather", "Clima variable"),
        };
        language.pick(en, es)
    }

    pub fn icon(&self) -> &'static str {
        match self.group() {
            SkyGroup::Sunny => "☀️",
            SkyGroup::Cloudy => "⛅",
            SkyGroup::Wet | SkyGroup::Drizzle => "🌧️",
            SkyGroup::Stormy => "⛈️",
            SkyGroup::Foggy => "🌫️",
            SkyGroup::Snowy => "❄️",
            SkyGroup::Showers | SkyGroup::Unsettled => "🌤️",
        }
    }
}
