//! WebAssembly module for the AgroClima Platform
//!
//! Lets the browser client run the shared agronomy rules locally on the crop
//! list it already holds:
//! - Dashboard summaries
//! - Task generation
//! - Weather recommendations
//! - Offline crop validation
//!
//! Inputs and outputs are JSON strings. Dates are ISO `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    generate_tasks, generate_type_specific_tasks, select_featured, task_stats, validate_crop,
    CropRecord, DashboardAggregator, EstimatorConfig, Language, Task, TaskStats, WeatherCondition,
};
use wasm_bindgen::prelude::*;

/// Result of task generation as the task page consumes it
#[derive(Debug, Serialize)]
struct TaskBoard<'a> {
    tasks: &'a [Task],
    featured: &'a [Task],
    stats: TaskStats,
}

// ============================================================================
// JSON helpers
// ============================================================================

fn parse_today(today_iso: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(today_iso.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", today_iso, e))
}

fn parse_crops(crops_json: &str) -> Result<Vec<CropRecord>, String> {
    serde_json::from_str(crops_json).map_err(|e| format!("Invalid crops JSON: {}", e))
}

/// Language from a code or name; anything unrecognized is English
fn parse_language(lang: &str) -> Language {
    serde_json::from_value(serde_json::Value::String(lang.trim().to_lowercase()))
        .unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn summarize_json(crops_json: &str, today_iso: &str, lang: &str) -> Result<String, String> {
    let crops = parse_crops(crops_json)?;
    let today = parse_today(today_iso)?;
    let aggregator = DashboardAggregator::new(EstimatorConfig::default(), parse_language(lang));
    to_json(&aggregator.summarize(&crops, today))
}

fn task_board_json(crops_json: &str, today_iso: &str) -> Result<String, String> {
    let mut crops = parse_crops(crops_json)?;
    crops.retain(|c| c.active);
    let today = parse_today(today_iso)?;

    let tasks = generate_tasks(&crops, today);
    to_json(&TaskBoard {
        tasks: &tasks,
        featured: select_featured(&tasks),
        stats: task_stats(&tasks),
    })
}

fn crop_type_tasks_json(crop_type: &str, crop_id: i64, today_iso: &str) -> Result<String, String> {
    let today = parse_today(today_iso)?;
    to_json(&generate_type_specific_tasks(
        &crop_type.to_lowercase(),
        crop_id,
        today,
    ))
}

fn recommendations_json(wmo_code: u16, temperature: f64, lang: &str) -> Result<String, String> {
    let condition = WeatherCondition::from_wmo_code(wmo_code);
    to_json(&shared::recommendations(
        condition,
        temperature,
        parse_language(lang),
    ))
}

fn check_crop_json(crop_json: &str) -> Result<(), String> {
    let crop: CropRecord =
        serde_json::from_str(crop_json).map_err(|e| format!("Invalid crop JSON: {}", e))?;
    validate_crop(&crop).map_err(str::to_string)
}

/// Report a binding error to the browser console and hand it to the caller
fn js_error(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

// ============================================================================
// Exports
// ============================================================================

/// Dashboard summary of a crop list
#[wasm_bindgen]
pub fn summarize_crops(crops_json: &str, today_iso: &str, lang: &str) -> Result<String, JsValue> {
    summarize_json(crops_json, today_iso, lang).map_err(js_error)
}

/// Tasks, featured tasks and counts for the active crops in a list
#[wasm_bindgen]
pub fn generate_task_board(crops_json: &str, today_iso: &str) -> Result<String, JsValue> {
    task_board_json(crops_json, today_iso).map_err(js_error)
}

/// Tasks specific to one crop type
#[wasm_bindgen]
pub fn crop_type_tasks(crop_type: &str, crop_id: i32, today_iso: &str) -> Result<String, JsValue> {
    crop_type_tasks_json(crop_type, i64::from(crop_id), today_iso).map_err(js_error)
}

/// Recommendations for a WMO weather code and temperature
#[wasm_bindgen]
pub fn weather_recommendations(
    wmo_code: u16,
    temperature: f64,
    lang: &str,
) -> Result<String, JsValue> {
    recommendations_json(wmo_code, temperature, lang).map_err(js_error)
}

/// Weather description for a WMO code
#[wasm_bindgen]
pub fn weather_description(wmo_code: u16, lang: &str) -> String {
    WeatherCondition::from_wmo_code(wmo_code)
        .description(parse_language(lang))
        .to_string()
}

/// Chart color for a crop type
#[wasm_bindgen]
pub fn crop_color(crop_type: &str) -> String {
    shared::crop_color(crop_type).to_string()
}

/// Validate a crop before sending it to the farm API
#[wasm_bindgen]
pub fn validate_crop_form(crop_json: &str) -> Result<(), JsValue> {
    check_crop_json(crop_json).map_err(JsValue::from)
}

/// Today's date from the browser clock, as `YYYY-MM-DD`
#[wasm_bindgen]
pub fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}
