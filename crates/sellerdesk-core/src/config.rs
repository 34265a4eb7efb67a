use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
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

    let env = parse_environment(&or_default("SELLERDESK_ENV", "development"))?;
    let log_level = or_default("SELLERDESK_LOG_LEVEL", "info");
    let api_base_url = require("SELLERDESK_API_BASE_URL")?;
    let api_token = lookup("SELLERDESK_API_TOKEN")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let shop_id = lookup("SELLERDESK_SHOP_ID")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let request_timeout_secs = parse_u64("SELLERDESK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SELLERDESK_USER_AGENT", "sellerdesk/0.1 (seller-admin)");
    let max_retries = parse_u32("SELLERDESK_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("SELLERDESK_RETRY_BACKOFF_BASE_MS", "500")?;

    let max_image_bytes = parse_u64("SELLERDESK_MAX_IMAGE_BYTES", "5242880")?;
    let max_images = parse_usize("SELLERDESK_MAX_IMAGES", "8")?;
    let create_min_images = parse_usize("SELLERDESK_CREATE_MIN_IMAGES", "2")?;
    let edit_min_images = parse_usize("SELLERDESK_EDIT_MIN_IMAGES", "1")?;

    if max_images == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SELLERDESK_MAX_IMAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    for (var, min) in [
        ("SELLERDESK_CREATE_MIN_IMAGES", create_min_images),
        ("SELLERDESK_EDIT_MIN_IMAGES", edit_min_images),
    ] {
        if min > max_images {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{min} exceeds SELLERDESK_MAX_IMAGES ({max_images})"),
            });
        }
    }

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        api_token,
        shop_id,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        max_image_bytes,
        max_images,
        create_min_images,
        edit_min_images,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SELLERDESK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
