use crate::app_config::{AnalysisPolicy, AppConfig, DEFAULT_ML_API_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or validate.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or validate.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<bool>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_weight = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("weight {value} outside [0, 1]"),
            });
        }
        Ok(value)
    };

    let log_level = or_default("PULSE_LOG_LEVEL", "info");
    let ml_api_url = or_default("PULSE_ML_API_URL", DEFAULT_ML_API_URL);
    let ml_api_key = lookup("PULSE_ML_API_KEY").ok();
    let ml_timeout_secs = parse_u64("PULSE_ML_TIMEOUT_SECS", "10")?;
    let translate_enabled = parse_bool("PULSE_TRANSLATE", "true")?;
    let max_workers = parse_usize("PULSE_MAX_WORKERS", "8")?;
    let max_items = parse_usize("PULSE_MAX_ITEMS", "100")?;
    let cache_capacity = parse_u64("PULSE_CACHE_CAPACITY", "256")?;
    let cache_ttl_secs = parse_u64("PULSE_CACHE_TTL_SECS", "3600")?;

    let policy = AnalysisPolicy {
        text_weight: parse_weight("PULSE_TEXT_WEIGHT", "0.7")?,
        comment_weight: parse_weight("PULSE_COMMENT_WEIGHT", "0.7")?,
    };

    if max_workers == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PULSE_MAX_WORKERS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        ml_api_url,
        ml_api_key,
        ml_timeout_secs,
        translate_enabled,
        max_workers,
        max_items,
        cache_capacity,
        cache_ttl_secs,
        policy,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
