//! Dashboard aggregation tests
//!
//! Grouped counts must account for every crop, groups are ordered by
//! frequency, and the monthly series only counts current-year sowings.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    summarize, CropRecord, DashboardAggregator, EstimatorConfig, Language,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Strategies
// ============================================================================

fn crop_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("maize".to_string()),
        Just("Maíz".to_string()),
        Just("café".to_string()),
        Just("papa".to_string()),
        Just("".to_string()),
        Just("  ".to_string()),
        "[a-z]{3,8}",
    ]
}

fn status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("siembra".to_string()),
        Just("en crecimiento".to_string()),
        Just("cosechado".to_string()),
        Just("finalizado".to_string()),
        Just("".to_string()),
        "[a-z ]{0,12}",
    ]
}

/// Sowing dates from two years back to one year ahead of `today`
fn sow_date_strategy(today: NaiveDate) -> impl Strategy<Value = Option<NaiveDate>> {
    proptest::option::of((-730i64..365).prop_map(move |offset| today + Duration::days(offset)))
}

fn crops_strategy(today: NaiveDate) -> impl Strategy<Value = Vec<CropRecord>> {
    prop::collection::vec(
        (crop_type_strategy(), status_strategy(), sow_date_strategy(today)),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (crop_type, status, sown))| {
                let crop = CropRecord::new(i as i64 + 1, crop_type, status);
                match sown {
                    Some(date) => crop.with_sow_date(date),
                    None => crop,
                }
            })
            .collect()
    })
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Type and status groups both account for every crop
    #[test]
    fn prop_group_totals_match(crops in crops_strategy(ymd(2025, 6, 15))) {
        let summary = summarize(&crops, ymd(2025, 6, 15));
        let by_type: usize = summary.by_type.iter().map(|g| g.count).sum();
        let by_status: usize = summary.by_status.iter().map(|g| g.count).sum();
        prop_assert_eq!(summary.total_crops, crops.len());
        prop_assert_eq!(by_type, summary.total_crops);
        prop_assert_eq!(by_status, summary.total_crops);
    }

    /// Groups are ordered by count, ties in first-seen order
    #[test]
    fn prop_groups_non_increasing(crops in crops_strategy(ymd(2025, 6, 15))) {
        let summary = summarize(&crops, ymd(2025, 6, 15));
        for groups in [&summary.by_type, &summary.by_status] {
            for pair in groups.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }

        let first_seen = |label: &str| {
            crops.iter().position(|c| {
                let t = if c.crop_type.trim().is_empty() { "Unknown" } else { c.crop_type.as_str() };
                t == label
            })
        };
        for pair in summary.by_type.windows(2) {
            if pair[0].count == pair[1].count {
                prop_assert!(first_seen(&pair[0].label) < first_seen(&pair[1].label));
            }
        }
    }

    /// The monthly series never counts more crops than exist, and counts all
    /// of them exactly when every crop was sown this year
    #[test]
    fn prop_monthly_series_bounded(crops in crops_strategy(ymd(2025, 6, 15))) {
        let today = ymd(2025, 6, 15);
        let summary = summarize(&crops, today);
        let monthly: usize = summary.by_month.iter().map(|m| m.count).sum();
        let all_this_year = crops
            .iter()
            .all(|c| c.sow_date.map_or(false, |d| d.year() == today.year()));

        prop_assert_eq!(summary.by_month.len(), 12);
        prop_assert!(monthly <= summary.total_crops);
        prop_assert_eq!(monthly == summary.total_crops, all_this_year);
    }

    /// Same input and year, same summary
    #[test]
    fn prop_summarize_idempotent(
        crops in crops_strategy(ymd(2025, 6, 15)),
        day_offset in 0i64..200,
    ) {
        let first = summarize(&crops, ymd(2025, 1, 1));
        let later = summarize(&crops, ymd(2025, 1, 1) + Duration::days(day_offset));
        prop_assert_eq!(first, later);
    }

    /// Estimates scale linearly with the crop count
    #[test]
    fn prop_estimates_scale(count in 0usize..500) {
        let crops: Vec<_> = (0..count)
            .map(|i| CropRecord::new(i as i64 + 1, "arroz", "siembra"))
            .collect();
        let summary = summarize(&crops, ymd(2025, 6, 15));
        let n = Decimal::from(count);
        prop_assert_eq!(summary.estimated_yield, n * Decimal::from(10));
        prop_assert_eq!(summary.estimated_revenue, n * Decimal::from(1500));
        prop_assert_eq!(summary.estimated_area_hectares, n * Decimal::new(15, 1));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn empty_snapshot_gives_zeroed_summary() {
        let summary = summarize(&[], ymd(2025, 3, 10));
        assert_eq!(summary.total_crops, 0);
        assert_eq!(summary.estimated_area_hectares, Decimal::ZERO);
        assert_eq!(summary.estimated_revenue, Decimal::ZERO);
        assert!(summary.by_type.is_empty());
        assert!(summary.by_status.is_empty());

        let labels: Vec<_> = summary.by_month.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert!(summary.by_month.iter().all(|m| m.count == 0));
    }

    #[test]
    fn api_snapshot_with_bad_rows() {
        let json = r#"[
            {"id_cultivo": 1, "tipo_cultivo": "Maíz", "fecha_siembra": "2025-02-03", "estado": "siembra", "EstLogico": 1},
            {"id_cultivo": 2, "tipo_cultivo": "Maíz", "fecha_siembra": "2025-02-20T05:00:00.000Z", "estado": "en crecimiento", "EstLogico": 1},
            {"id_cultivo": 3, "tipo_cultivo": null, "fecha_siembra": "pending", "estado": null, "EstLogico": 1},
            {"id_cultivo": 4, "tipo_cultivo": "Yuca", "fecha_siembra": "2024-11-01", "fecha_cosecha": "2024-01-01", "estado": "siembra", "EstLogico": 1}
        ]"#;
        let crops: Vec<CropRecord> = serde_json::from_str(json).unwrap();
        let summary = summarize(&crops, ymd(2025, 5, 1));

        assert_eq!(summary.total_crops, 4);
        assert_eq!(summary.by_type[0].label, "Maíz");
        assert_eq!(summary.by_type[0].count, 2);
        assert!(summary.by_type.iter().any(|g| g.label == "Unknown"));
        assert_eq!(summary.by_status[0].label, "siembra");
        assert_eq!(summary.by_month[1].count, 2);
        assert_eq!(summary.by_month.iter().map(|m| m.count).sum::<usize>(), 2);
    }

    #[test]
    fn configured_estimator_and_spanish_labels() {
        let estimator = EstimatorConfig {
            area_per_crop: Decimal::new(2, 0),
            yield_per_crop: Decimal::new(8, 0),
            price_per_ton: Decimal::new(200, 0),
        };
        let aggregator = DashboardAggregator::new(estimator, Language::Spanish);
        let crops = vec![CropRecord::new(1, "café", "cosechado"), CropRecord::new(2, "café", "")];
        let summary = aggregator.summarize(&crops, ymd(2025, 5, 1));

        assert_eq!(summary.estimated_area_hectares, Decimal::from(4));
        assert_eq!(summary.estimated_yield, Decimal::from(16));
        assert_eq!(summary.estimated_revenue, Decimal::from(3200));
        assert_eq!(summary.by_month[7].month, "Ago");
    }

    #[test]
    fn summary_serializes_metrics_as_numbers() {
        let crops = vec![CropRecord::new(1, "papa", "siembra")];
        let json = serde_json::to_value(summarize(&crops, ymd(2025, 5, 1))).unwrap();
        assert_eq!(json["estimated_area_hectares"], 1.5);
        assert_eq!(json["estimated_revenue"], 1500.0);
        assert_eq!(json["by_type"][0]["label"], "papa");
    }
}
