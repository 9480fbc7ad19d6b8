use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_TRACKING_URL_TEMPLATE: &str = "https://www.linkcorreios.com.br/?id={}";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("CORREIOS_LOG_LEVEL", "info");

    let tracking_url_template = or_default(
        "CORREIOS_TRACKING_URL_TEMPLATE",
        DEFAULT_TRACKING_URL_TEMPLATE,
    );
    if tracking_url_template.matches("{}").count() != 1 {
        return Err(invalid(
            "CORREIOS_TRACKING_URL_TEMPLATE",
            "must contain exactly one `{}` placeholder".to_string(),
        ));
    }

    let shipments_path = PathBuf::from(or_default(
        "CORREIOS_SHIPMENTS_PATH",
        "./config/shipments.yaml",
    ));
    let icons_path = lookup("CORREIOS_ICONS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let request_timeout_secs = parse_u64("CORREIOS_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "CORREIOS_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let refresh_interval_secs = parse_u64("CORREIOS_REFRESH_INTERVAL_SECS", "1800")?;
    if refresh_interval_secs == 0 {
        return Err(invalid(
            "CORREIOS_REFRESH_INTERVAL_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("CORREIOS_USER_AGENT", "correios-tracker/0.1");
    let max_retries = parse_u32("CORREIOS_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("CORREIOS_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        log_level,
        tracking_url_template,
        shipments_path,
        icons_path,
        request_timeout_secs,
        refresh_interval_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
