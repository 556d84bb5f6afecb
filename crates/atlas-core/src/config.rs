use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Path of the expansion function relative to the hosted backend's base URL.
const EXPAND_FUNCTION_PATH: &str = "/functions/v1/expand-url";

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("ATLAS_ENV", "development"))?;
    let bind_addr = parse_addr("ATLAS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ATLAS_LOG_LEVEL", "info");

    let expand_endpoint = resolve_expand_endpoint(
        lookup("ATLAS_EXPAND_ENDPOINT").ok(),
        lookup("SUPABASE_URL").ok(),
    );
    let expand_timeout_ms = parse_u64("ATLAS_EXPAND_TIMEOUT_MS", "5000")?;

    let redirect_max_hops = parse_usize("ATLAS_REDIRECT_MAX_HOPS", "10")?;
    if redirect_max_hops == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ATLAS_REDIRECT_MAX_HOPS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let redirect_timeout_secs = parse_u64("ATLAS_REDIRECT_TIMEOUT_SECS", "10")?;
    let redirect_user_agent = or_default(
        "ATLAS_REDIRECT_USER_AGENT",
        "Mozilla/5.0 (compatible; URL Expander)",
    );

    let rate_limit_max_requests = parse_usize("ATLAS_RATE_LIMIT_MAX_REQUESTS", "120")?;
    let rate_limit_window_secs = parse_u64("ATLAS_RATE_LIMIT_WINDOW_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        expand_endpoint,
        expand_timeout_ms,
        redirect_max_hops,
        redirect_timeout_secs,
        redirect_user_agent,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

/// Picks the expansion endpoint: an explicit endpoint wins, otherwise the
/// function path is appended to the backend base URL. Blank values count as unset.
fn resolve_expand_endpoint(explicit: Option<String>, backend_url: Option<String>) -> Option<String> {
    let non_blank = |v: String| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    explicit.and_then(non_blank).or_else(|| {
        backend_url
            .and_then(non_blank)
            .map(|base| format!("{}{EXPAND_FUNCTION_PATH}", base.trim_end_matches('/')))
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ATLAS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
