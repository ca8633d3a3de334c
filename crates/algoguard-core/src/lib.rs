//! Domain records, handle normalization, and configuration for Algorithmic Guard.

pub mod app_config;
pub mod config;
pub mod handle;
pub mod profile;
pub mod strategy;
pub mod validate;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, log_level_from_env, state_dir_from_env,
};
pub use handle::normalize_handle;
pub use profile::{AccountStatus, Profile, RiskLevel};
pub use strategy::Strategy;
pub use validate::{parse_profile, parse_strategy, ValidationError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
