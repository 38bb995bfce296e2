//! Business logic services for the AgroClima backend

pub mod auth;
pub mod climate;
pub mod crops;
pub mod dashboard;
pub mod prediction;
pub mod tasks;

pub use auth::AuthService;
pub use climate::ClimateService;
pub use crops::CropService;
pub use dashboard::DashboardService;
pub use prediction::PredictionService;
pub use tasks::TaskService;
