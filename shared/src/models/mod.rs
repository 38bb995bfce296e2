//! Domain models for the AgroClima platform

mod crop;
mod dashboard;
mod prediction;
mod task;
mod user;
mod weather;

pub use crop::*;
pub use dashboard::*;
pub use prediction::*;
pub use task::*;
pub use user::*;
pub use weather::*;
