use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_STATE_DIR: &str = "./.algoguard";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Log filter directive from `ALGOGUARD_LOG_LEVEL`, for commands that run
/// before (or without) a full [`AppConfig`].
#[must_use]
pub fn log_level_from_env() -> String {
    std::env::var("ALGOGUARD_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// State directory from `ALGOGUARD_STATE_DIR`. History commands use this so
/// they work without an API key.
#[must_use]
pub fn state_dir_from_env() -> PathBuf {
    PathBuf::from(
        std::env::var("ALGOGUARD_STATE_DIR").unwrap_or_else(|_| DEFAULT_STATE_DIR.to_string()),
    )
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // `API_KEY` is accepted as a fallback for setups that share one key
    // across tools.
    let gemini_api_key = lookup("GEMINI_API_KEY")
        .or_else(|_| lookup("API_KEY"))
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

    let log_level = or_default("ALGOGUARD_LOG_LEVEL", DEFAULT_LOG_LEVEL);

    let gemini_model = or_default("ALGOGUARD_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("ALGOGUARD_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let request_timeout_secs = parse_u64("ALGOGUARD_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ALGOGUARD_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let state_dir = PathBuf::from(or_default("ALGOGUARD_STATE_DIR", DEFAULT_STATE_DIR));

    let narration_min_delay_ms = parse_u64("ALGOGUARD_NARRATION_MIN_DELAY_MS", "400")?;
    let narration_max_delay_ms = parse_u64("ALGOGUARD_NARRATION_MAX_DELAY_MS", "800")?;
    if narration_min_delay_ms > narration_max_delay_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "ALGOGUARD_NARRATION_MIN_DELAY_MS".to_string(),
            reason: format!(
                "{narration_min_delay_ms} exceeds ALGOGUARD_NARRATION_MAX_DELAY_MS ({narration_max_delay_ms})"
            ),
        });
    }

    Ok(AppConfig {
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        state_dir,
        narration_min_delay_ms,
        narration_max_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
