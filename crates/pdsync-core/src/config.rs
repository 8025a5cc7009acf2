use crate::app_config::{AppConfig, Environment};
use crate::event::ShopDomain;
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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let purple_dot_api_url = require("PURPLE_DOT_API_URL")?;
    let purple_dot_api_key = require("PURPLE_DOT_API_KEY")?;

    let env = parse_environment(&or_default("PDSYNC_ENV", "development"))?;

    let port = parse_u16("PORT", "3000")?;
    let host_raw = or_default("PDSYNC_BIND_HOST", "0.0.0.0");
    let host = host_raw
        .parse::<IpAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "PDSYNC_BIND_HOST".to_string(),
            reason: e.to_string(),
        })?;
    let bind_addr = SocketAddr::new(host, port);

    let log_level = or_default("PDSYNC_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("PDSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PDSYNC_USER_AGENT", "pdsync/0.1 (preorder-metafield-sync)");

    let shopify_api_version = or_default("SHOPIFY_API_VERSION", "2025-01");
    let shopify_shop_domain = optional("SHOPIFY_SHOP_DOMAIN")
        .map(|raw| {
            ShopDomain::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar {
                var: "SHOPIFY_SHOP_DOMAIN".to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;
    let shopify_admin_base_url = optional("SHOPIFY_ADMIN_BASE_URL");
    let shopify_webhook_secret = optional("SHOPIFY_WEBHOOK_SECRET");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
        shopify_access_token,
        shopify_api_version,
        shopify_shop_domain,
        shopify_admin_base_url,
        shopify_webhook_secret,
        purple_dot_api_url,
        purple_dot_api_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PDSYNC_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
