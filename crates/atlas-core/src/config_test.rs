use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ATLAS_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.expand_endpoint.is_none());
    assert_eq!(cfg.expand_timeout_ms, 5000);
    assert_eq!(cfg.redirect_max_hops, 10);
    assert_eq!(cfg.redirect_timeout_secs, 10);
    assert_eq!(
        cfg.redirect_user_agent,
        "Mozilla/5.0 (compatible; URL Expander)"
    );
    assert_eq!(cfg.rate_limit_max_requests, 120);
    assert_eq!(cfg.rate_limit_window_secs, 60);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("ATLAS_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATLAS_BIND_ADDR"),
        "expected InvalidEnvVar(ATLAS_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_environment() {
    let mut map = HashMap::new();
    map.insert("ATLAS_ENV", "qa");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATLAS_ENV"),
        "expected InvalidEnvVar(ATLAS_ENV), got: {result:?}"
    );
}

#[test]
fn expand_endpoint_explicit_value_wins() {
    let mut map = HashMap::new();
    map.insert("ATLAS_EXPAND_ENDPOINT", "http://localhost:3000/expand");
    map.insert("SUPABASE_URL", "https://project.supabase.co");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.expand_endpoint.as_deref(),
        Some("http://localhost:3000/expand")
    );
}

#[test]
fn expand_endpoint_derived_from_backend_url() {
    let mut map = HashMap::new();
    map.insert("SUPABASE_URL", "https://project.supabase.co/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.expand_endpoint.as_deref(),
        Some("https://project.supabase.co/functions/v1/expand-url")
    );
}

#[test]
fn expand_endpoint_blank_values_are_unset() {
    let mut map = HashMap::new();
    map.insert("ATLAS_EXPAND_ENDPOINT", "   ");
    map.insert("SUPABASE_URL", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.expand_endpoint.is_none());
}

#[test]
fn expand_timeout_ms_override() {
    let mut map = HashMap::new();
    map.insert("ATLAS_EXPAND_TIMEOUT_MS", "1500");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.expand_timeout_ms, 1500);
}

#[test]
fn expand_timeout_ms_invalid() {
    let mut map = HashMap::new();
    map.insert("ATLAS_EXPAND_TIMEOUT_MS", "five-seconds");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATLAS_EXPAND_TIMEOUT_MS"),
        "expected InvalidEnvVar(ATLAS_EXPAND_TIMEOUT_MS), got: {result:?}"
    );
}

#[test]
fn redirect_max_hops_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("ATLAS_REDIRECT_MAX_HOPS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATLAS_REDIRECT_MAX_HOPS"),
        "expected InvalidEnvVar(ATLAS_REDIRECT_MAX_HOPS), got: {result:?}"
    );
}

#[test]
fn redirect_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("ATLAS_REDIRECT_USER_AGENT", "atlas-test/1.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.redirect_user_agent, "atlas-test/1.0");
}

#[test]
fn rate_limit_max_requests_invalid() {
    let mut map = HashMap::new();
    map.insert("ATLAS_RATE_LIMIT_MAX_REQUESTS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATLAS_RATE_LIMIT_MAX_REQUESTS"),
        "expected InvalidEnvVar(ATLAS_RATE_LIMIT_MAX_REQUESTS), got: {result:?}"
    );
}
