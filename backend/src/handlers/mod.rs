//! HTTP request handlers

pub mod auth;
pub mod crops;
pub mod dashboard;
pub mod health;
pub mod prediction;
pub mod tasks;
pub mod weather;

pub use auth::{login, me, register};
pub use crops::{create_crop, delete_crop, get_crop, list_crops, list_irrigations, update_crop};
pub use dashboard::get_dashboard;
pub use health::health_check;
pub use prediction::{predict_pest_risk, predict_plant};
pub use tasks::{get_crop_type_tasks, get_tasks};
pub use weather::get_current_weather;
