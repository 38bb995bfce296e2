//! Shared types and agronomy rules for the AgroClima platform
//!
//! This crate contains the crop models and the pure computations shared
//! between the backend and the browser client (via WASM): dashboard
//! aggregation, task generation and weather recommendations. Nothing here
//! performs I/O or reads the clock; callers pass the reference date in.

pub mod climate;
pub mod dashboard;
pub mod models;
pub mod tasks;
pub mod types;
pub mod validation;

pub use climate::*;
pub use dashboard::*;
pub use models::*;
pub use tasks::*;
pub use types::*;
pub use validation::*;
