//! Dashboard summary models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Chart-ready view of a crop list. Recomputed on every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_crops: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_area_hectares: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_yield: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_revenue: Decimal,
    /// Crops per type, most common first
    pub by_type: Vec<GroupCount>,
    /// Crops per status, most common first
    pub by_status: Vec<GroupCount>,
    /// Sowings per month of the current year, January first
    pub by_month: Vec<MonthCount>,
}

impl DashboardSummary {
    /// The `n` most common crop types (the distribution chart shows five)
    pub fn top_types(&self, n: usize) -> &[GroupCount] {
        &self.by_type[..n.min(self.by_type.len())]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

/// Fixed multipliers behind the estimated metrics.
///
/// These are illustrative estimators, not a physical model: hectares per
/// crop, tonnes per crop, and price per tonne.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EstimatorConfig {
    pub area_per_crop: Decimal,
    pub yield_per_crop: Decimal,
    pub price_per_ton: Decimal,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            area_per_crop: Decimal::new(15, 1),
            yield_per_crop: Decimal::from(10),
            price_per_ton: Decimal::from(150),
        }
    }
}
