//! Prediction service models

use serde::{Deserialize, Serialize};

/// Field readings sent to the pest-risk model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PestRiskInput {
    pub temperature: f64,
    pub humidity: f64,
    pub days_without_rain: u32,
}

/// Pest outbreak risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PestRisk {
    Low,
    Medium,
    High,
}

impl PestRisk {
    /// Read the risk label produced by the prediction service
    /// (`bajo`, `medio`, `alto`), also accepting the English names.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "bajo" | "low" => Some(PestRisk::Low),
            "medio" | "medium" => Some(PestRisk::Medium),
            "alto" | "high" => Some(PestRisk::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for PestRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PestRisk::Low => write!(f, "low"),
            PestRisk::Medium => write!(f, "medium"),
            PestRisk::High => write!(f, "high"),
        }
    }
}

/// Result of a pest-risk prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PestRiskAssessment {
    pub risk: PestRisk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_labels() {
        assert_eq!(PestRisk::from_label("bajo"), Some(PestRisk::Low));
        assert_eq!(PestRisk::from_label("Medio"), Some(PestRisk::Medium));
        assert_eq!(PestRisk::from_label(" alto "), Some(PestRisk::High));
        assert_eq!(PestRisk::from_label("high"), Some(PestRisk::High));
        assert_eq!(PestRisk::from_label("extremo"), None);
    }
}
