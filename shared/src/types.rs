//! Common types used across the platform

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Display format for task due dates
pub const DUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "es")]
    Spanish,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    /// Pick the string matching this language
    pub fn pick<'a>(&self, en: &'a str, es: &'a str) -> &'a str {
        match self {
            Language::English => en,
            Language::Spanish => es,
        }
    }
}

/// Error returned when a `DD/MM/YYYY` date cannot be read
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date '{input}', expected DD/MM/YYYY")]
pub struct DateFormatError {
    pub input: String,
}

/// Format a date as `DD/MM/YYYY`
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Parse a `DD/MM/YYYY` date
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, DateFormatError> {
    NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT).map_err(|_| DateFormatError {
        input: raw.to_string(),
    })
}

/// Read a calendar date from the shapes the farm API produces.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, naive ISO timestamps and
/// `DD/MM/YYYY`. Timestamps keep the calendar date as written.
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT).ok()
}

/// Deserialize a nullable string as an empty string
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde adapter for `DD/MM/YYYY` dates
pub mod dmy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_due_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_due_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional dates that must never fail to deserialize.
/// Anything unreadable becomes `None`.
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(Value::as_str)
            .and_then(super::parse_lenient_date))
    }
}

/// Serde adapter for the API's numeric soft-delete flag (`EstLogico`).
/// Accepts booleans, 0/1 numbers and strings; null counts as set.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
            Some(Value::String(s)) => !matches!(s.trim(), "0" | "false" | ""),
            _ => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_date_format() {
        assert_eq!(format_due_date(ymd(2025, 3, 7)), "07/03/2025");
        assert_eq!(parse_due_date("07/03/2025"), Ok(ymd(2025, 3, 7)));
        assert!(parse_due_date("2025-03-07").is_err());
    }

    #[test]
    fn test_lenient_date_shapes() {
        assert_eq!(parse_lenient_date("2024-05-01"), Some(ymd(2024, 5, 1)));
        assert_eq!(
            parse_lenient_date("2024-05-01T00:00:00.000Z"),
            Some(ymd(2024, 5, 1))
        );
        assert_eq!(
            parse_lenient_date("2024-05-01T10:30:00"),
            Some(ymd(2024, 5, 1))
        );
        assert_eq!(parse_lenient_date("01/05/2024"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_lenient_date("not a date"), None);
        assert_eq!(parse_lenient_date("   "), None);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::Spanish.code(), "es");
        let parsed: Language = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(parsed, Language::Spanish);
    }
}
