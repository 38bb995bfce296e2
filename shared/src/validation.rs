//! Validation utilities for the AgroClima platform

use rust_decimal::Decimal;

use crate::models::{CropRecord, PestRiskInput};
use crate::types::GpsCoordinates;

// ============================================================================
// Crop Validations
// ============================================================================

/// Validate a crop before it is sent to the farm API.
///
/// Aggregation and task generation accept any crop; this check only guards
/// writes.
pub fn validate_crop(crop: &CropRecord) -> Result<(), &'static str> {
    if crop.id < 0 {
        return Err("Crop id cannot be negative");
    }
    if crop.crop_type.trim().is_empty() {
        return Err("Crop type is required");
    }
    if crop.sow_date.is_none() {
        return Err("Sowing date is required");
    }
    if !crop.has_consistent_dates() {
        return Err("Harvest date cannot be before sowing date");
    }
    Ok(())
}

/// Validate a crop id taken from a request path
pub fn validate_crop_id(id: i64) -> Result<(), &'static str> {
    if id <= 0 {
        return Err("Crop id must be positive");
    }
    Ok(())
}

// ============================================================================
// Weather and Prediction Validations
// ============================================================================

/// Validate latitude/longitude ranges
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), &'static str> {
    if coordinates.latitude < Decimal::from(-90) || coordinates.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coordinates.longitude < Decimal::from(-180) || coordinates.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate pest-risk readings
pub fn validate_pest_risk_input(input: &PestRiskInput) -> Result<(), &'static str> {
    if !input.temperature.is_finite() || !(-50.0..=60.0).contains(&input.temperature) {
        return Err("Temperature must be between -50 and 60 °C");
    }
    if !input.humidity.is_finite() || !(0.0..=100.0).contains(&input.humidity) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate that a password was provided. Strength rules live with the farm API.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.trim().is_empty() {
        return Err("Password is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_crop() {
        let crop = CropRecord::new(0, "maíz", "siembra").with_sow_date(ymd(2025, 3, 1));
        assert!(validate_crop(&crop).is_ok());

        let no_type = CropRecord::new(1, "  ", "siembra").with_sow_date(ymd(2025, 3, 1));
        assert_eq!(validate_crop(&no_type), Err("Crop type is required"));

        let no_date = CropRecord::new(1, "papa", "siembra");
        assert_eq!(validate_crop(&no_date), Err("Sowing date is required"));

        let reversed = CropRecord::new(1, "papa", "")
            .with_sow_date(ymd(2025, 3, 1))
            .with_harvest_date(ymd(2025, 1, 1));
        assert!(validate_crop(&reversed).is_err());
    }

    #[test]
    fn test_validate_crop_id() {
        assert!(validate_crop_id(1).is_ok());
        assert!(validate_crop_id(0).is_err());
        assert!(validate_crop_id(-4).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        let ok = GpsCoordinates::new(Decimal::new(1096, 2), Decimal::new(-7478, 2));
        assert!(validate_coordinates(&ok).is_ok());

        let bad_lat = GpsCoordinates::new(Decimal::from(91), Decimal::ZERO);
        assert!(validate_coordinates(&bad_lat).is_err());

        let bad_lon = GpsCoordinates::new(Decimal::ZERO, Decimal::from(-181));
        assert!(validate_coordinates(&bad_lon).is_err());
    }

    #[test]
    fn test_validate_pest_risk_input() {
        let ok = PestRiskInput {
            temperature: 31.0,
            humidity: 80.0,
            days_without_rain: 4,
        };
        assert!(validate_pest_risk_input(&ok).is_ok());

        let wet = PestRiskInput {
            humidity: 120.0,
            ..ok
        };
        assert!(validate_pest_risk_input(&wet).is_err());

        let nan = PestRiskInput {
            temperature: f64::NAN,
            ..ok
        };
        assert!(validate_pest_risk_input(&nan).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@finca.co").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secreto").is_ok());
        assert!(validate_password("   ").is_err());
    }
}
