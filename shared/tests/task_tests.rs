//! Task generator tests
//!
//! Due dates always lie in the future, the list is ordered by date then
//! priority, and the documented lifecycle scenarios produce the expected
//! tasks.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{
    format_due_date, generate_tasks, generate_type_specific_tasks, parse_due_date,
    select_featured, task_stats, CropRecord, Task, TaskCategory, TaskPriority, TaskState,
    FEATURED_TASK_LIMIT,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn find<'a>(tasks: &'a [Task], name: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.name == name)
}

// ============================================================================
// Strategies
// ============================================================================

fn today_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| ymd(2020, 1, 1) + Duration::days(offset))
}

fn status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("sowing".to_string()),
        Just("Siembra".to_string()),
        Just("en crecimiento".to_string()),
        Just("harvested".to_string()),
        Just("finalizado".to_string()),
        Just("lost".to_string()),
        Just("".to_string()),
        "[a-z]{0,10}",
    ]
}

fn crop_strategy() -> impl Strategy<Value = (String, String, Option<i64>)> {
    (
        prop_oneof![Just("maize"), Just("café"), Just("papa"), Just("yuca"), Just("")]
            .prop_map(str::to_string),
        status_strategy(),
        proptest::option::of(-30i64..400),
    )
}

fn crops_strategy(today: NaiveDate) -> impl Strategy<Value = Vec<CropRecord>> {
    prop::collection::vec(crop_strategy(), 0..25).prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (crop_type, status, age))| {
                let crop = CropRecord::new(i as i64 + 1, crop_type, status);
                match age {
                    Some(days) => crop.with_sow_date(today - Duration::days(days)),
                    None => crop,
                }
            })
            .collect()
    })
}

fn snapshot_strategy() -> impl Strategy<Value = (NaiveDate, Vec<CropRecord>)> {
    today_strategy().prop_flat_map(|today| (Just(today), crops_strategy(today)))
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every generated task is due after today
    #[test]
    fn prop_due_dates_in_future((today, crops) in snapshot_strategy()) {
        for task in generate_tasks(&crops, today) {
            prop_assert!(task.due_date > today);
            prop_assert!(task.state != TaskState::Completed);
        }
    }

    /// Adjacent tasks are ordered by date, then by descending priority
    #[test]
    fn prop_tasks_sorted((today, crops) in snapshot_strategy()) {
        let tasks = generate_tasks(&crops, today);
        for pair in tasks.windows(2) {
            prop_assert!(pair[0].due_date <= pair[1].due_date);
            if pair[0].due_date == pair[1].due_date {
                prop_assert!(pair[0].priority.weight() >= pair[1].priority.weight());
            }
        }
    }

    /// Every crop still in the field ends up with at least one irrigation task
    #[test]
    fn prop_active_crops_are_irrigated((today, crops) in snapshot_strategy()) {
        let tasks = generate_tasks(&crops, today);
        for crop in &crops {
            let status = crop.status.to_lowercase();
            if status.contains("finalizado") || status.contains("finished")
                || status.contains("perdido") || status.contains("lost")
            {
                continue;
            }
            let irrigated = tasks.iter().any(|t| {
                t.plot_ref == crop.plot_ref() && t.category == TaskCategory::Irrigation
            });
            prop_assert!(irrigated, "crop {} has no irrigation task", crop.id);
        }
    }

    /// Generation is a pure function of the snapshot and date
    #[test]
    fn prop_generation_deterministic((today, crops) in snapshot_strategy()) {
        prop_assert_eq!(generate_tasks(&crops, today), generate_tasks(&crops, today));
    }

    /// The featured list is a prefix of the full list
    #[test]
    fn prop_featured_is_prefix((today, crops) in snapshot_strategy()) {
        let tasks = generate_tasks(&crops, today);
        let featured = select_featured(&tasks);
        prop_assert_eq!(featured.len(), tasks.len().min(FEATURED_TASK_LIMIT));
        prop_assert_eq!(featured, &tasks[..featured.len()]);

        let stats = task_stats(&tasks);
        prop_assert_eq!(stats.pending + stats.scheduled + stats.completed, stats.total);
    }

    /// Due dates survive the DD/MM/YYYY display format
    #[test]
    fn prop_due_date_display_format(today in today_strategy(), offset in 1i64..30) {
        let due = today + Duration::days(offset);
        prop_assert_eq!(parse_due_date(&format_due_date(due)), Ok(due));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn maize_just_sown() {
        let today = ymd(2025, 4, 10);
        let crop = CropRecord::new(1, "maize", "sowing").with_sow_date(today - Duration::days(5));
        let tasks = generate_tasks(&[crop], today);

        let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Initial irrigation", "Germination monitoring"]);

        let irrigation = find(&tasks, "Initial irrigation").unwrap();
        assert_eq!(irrigation.due_date, ymd(2025, 4, 11));
        assert_eq!(irrigation.priority, TaskPriority::High);
        assert_eq!(irrigation.state, TaskState::Pending);
        assert_eq!(irrigation.plot_ref, "1");

        let monitoring = find(&tasks, "Germination monitoring").unwrap();
        assert_eq!(monitoring.due_date, ymd(2025, 4, 17));
        assert_eq!(monitoring.priority, TaskPriority::Medium);

        assert!(find(&tasks, "Regular irrigation").is_none());
    }

    #[test]
    fn potato_growing_past_ninety_days_gets_two_stages() {
        let today = ymd(2025, 9, 1);
        let crop = CropRecord::new(2, "Potato", "growing").with_sow_date(today - Duration::days(90));
        let tasks = generate_tasks(&[crop], today);

        for name in [
            "NPK fertilization",
            "Weed control",
            "Pest inspection",
            "Prepare harvest",
            "Reduce irrigation",
        ] {
            assert!(find(&tasks, name).is_some(), "missing {}", name);
        }
        assert!(find(&tasks, "Regular irrigation").is_none());
        assert_eq!(tasks.len(), 5);
    }

    #[test]
    fn maize_type_specific_table() {
        let today = ymd(2025, 4, 10);
        for crop_type in ["maize", "maíz", "Maíz"] {
            let tasks = generate_type_specific_tasks(crop_type, 7, today);
            assert_eq!(tasks.len(), 2);

            assert_eq!(tasks[0].name, "Fall armyworm control");
            assert_eq!(tasks[0].description, "Inspect and control Spodoptera frugiperda");
            assert_eq!(tasks[0].plot_ref, "7");
            assert_eq!(tasks[0].due_date, ymd(2025, 4, 12));
            assert_eq!(tasks[0].priority, TaskPriority::High);
            assert_eq!(tasks[0].category, TaskCategory::PestControl);
            assert_eq!(tasks[0].state, TaskState::Pending);

            assert_eq!(tasks[1].name, "Apply insecticide");
            assert_eq!(tasks[1].due_date, ymd(2025, 4, 14));
            assert_eq!(tasks[1].priority, TaskPriority::Medium);
            assert_eq!(tasks[1].state, TaskState::Scheduled);
        }
    }

    #[test]
    fn crops_from_api_json() {
        let json = r#"[
            {"id_cultivo": 10, "tipo_cultivo": "Arroz", "fecha_siembra": "2025-03-01", "estado": "en crecimiento", "EstLogico": 1},
            {"id_cultivo": 11, "tipo_cultivo": "Yuca", "fecha_siembra": null, "estado": "perdido", "EstLogico": 1}
        ]"#;
        let crops: Vec<CropRecord> = serde_json::from_str(json).unwrap();
        let tasks = generate_tasks(&crops, ymd(2025, 3, 31));

        assert!(tasks.iter().all(|t| t.plot_ref == "10"));
        let json = serde_json::to_value(&tasks[0]).unwrap();
        assert_eq!(json["due_date"], "02/04/2025");
    }
}
