//! Dashboard aggregation over a crop snapshot
//!
//! Turns a list of crops into the grouped counts and estimated metrics the
//! dashboard charts display. Aggregation is infallible: blank labels fall into
//! a sentinel bucket and crops without a readable sowing date are left out of
//! the monthly series.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CropRecord, DashboardSummary, EstimatorConfig, GroupCount, MonthCount};
use crate::types::Language;

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_ES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Chart colour for crop types without an assigned colour
pub const DEFAULT_CROP_COLOR: &str = "#9e9e9e";

/// Short month labels, January first
pub fn month_labels(language: Language) -> &'static [&'static str; 12] {
    match language {
        Language::English => &MONTHS_EN,
        Language::Spanish => &MONTHS_ES,
    }
}

/// Chart colour for a crop type, matched case-insensitively on English or
/// Spanish names
pub fn crop_color(crop_type: &str) -> &'static str {
    match crop_type.trim().to_lowercase().as_str() {
        "maize" | "corn" | "maiz" | "maíz" => "#66bb6a",
        "coffee" | "cafe" | "café" => "#8d6e63",
        "cassava" | "yuca" => "#ffa726",
        "rice" | "arroz" => "#42a5f5",
        "plantain" | "platano" | "plátano" => "#ffeb3b",
        "cocoa" | "cacao" => "#795548",
        "potato" | "papa" => "#ab47bc",
        "tomato" | "tomate" => "#ef5350",
        "avocado" | "aguacate" => "#4caf50",
        "coconut" | "coco" => "#ff9800",
        _ => DEFAULT_CROP_COLOR,
    }
}

/// Builds [`DashboardSummary`] values with a fixed estimator and label language
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardAggregator {
    estimator: EstimatorConfig,
    language: Language,
}

impl DashboardAggregator {
    pub fn new(estimator: EstimatorConfig, language: Language) -> Self {
        Self {
            estimator,
            language,
        }
    }

    pub fn estimator(&self) -> &EstimatorConfig {
        &self.estimator
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Summarize a crop snapshot. `today` only selects the year for the
    /// monthly series.
    pub fn summarize(&self, crops: &[CropRecord], today: NaiveDate) -> DashboardSummary {
        let total = crops.len();
        let count = Decimal::from(total);

        let estimated_area_hectares = (count * self.estimator.area_per_crop)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        let estimated_yield = count * self.estimator.yield_per_crop;
        let estimated_revenue = estimated_yield * self.estimator.price_per_ton;

        let unknown_type = self.language.pick("Unknown", "Desconocido");
        let unknown_status = self.language.pick("unknown", "desconocido");

        DashboardSummary {
            total_crops: total,
            estimated_area_hectares,
            estimated_yield,
            estimated_revenue,
            by_type: count_by(crops.iter().map(|c| c.crop_type.as_str()), unknown_type),
            by_status: count_by(crops.iter().map(|c| c.status.as_str()), unknown_status),
            by_month: self.count_by_month(crops, today.year()),
        }
    }

    fn count_by_month(&self, crops: &[CropRecord], year: i32) -> Vec<MonthCount> {
        let mut counts = [0usize; 12];
        for sown in crops.iter().filter_map(|c| c.sow_date) {
            if sown.year() == year {
                counts[sown.month0() as usize] += 1;
            }
        }

        month_labels(self.language)
            .iter()
            .zip(counts)
            .map(|(month, count)| MonthCount {
                month: month.to_string(),
                count,
            })
            .collect()
    }
}

/// Summarize with the default estimator and English labels
pub fn summarize(crops: &[CropRecord], today: NaiveDate) -> DashboardSummary {
    DashboardAggregator::default().summarize(crops, today)
}

/// Count occurrences of each label, most frequent first. Ties keep the order
/// in which labels were first seen. Blank labels are counted under `fallback`.
fn count_by<'a>(labels: impl Iterator<Item = &'a str>, fallback: &str) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for label in labels {
        let label = if label.trim().is_empty() {
            fallback
        } else {
            label
        };
        match index.get(label) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(label.to_string(), groups.len());
                groups.push(GroupCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
