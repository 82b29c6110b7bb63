pub mod app_config;
pub mod catalog;
pub mod config;
pub mod cuisine;
pub mod hours;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Coordinates, HawkerCenter, MenuItem, Stall, PLACEHOLDER_HAWKER_IMAGE};
pub use config::{load_app_config, load_app_config_from_env};
pub use cuisine::Cuisine;
pub use hours::{open_status, DaySchedule, OpenStatus, WeeklySchedule, Weekday};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
