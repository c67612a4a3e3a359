//! Credential and endpoint resolution for the wisdom backend.

use anyhow::{Context, Result};

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: [&str; 3] = ["CODERISTIC_API_KEY", "OPENAI_API_KEY", "API_KEY"];

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV_VAR: &str = "CODERISTIC_BASE_URL";

/// Placeholder some build pipelines inject for an unset secret.
pub const UNSET_SENTINEL: &str = "undefined";

fn usable(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty() && trimmed != UNSET_SENTINEL).then_some(trimmed)
}

/// Resolves an API key with precedence: config > env vars (in order).
///
/// Blank values and the literal `"undefined"` count as missing.
pub fn resolve_api_key<F>(config_api_key: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = config_api_key.and_then(usable) {
        return Some(key.to_string());
    }

    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find_map(|value| usable(&value).map(str::to_string))
}

/// [`resolve_api_key`] against the process environment.
pub fn api_key_from_env(config_api_key: Option<&str>) -> Option<String> {
    resolve_api_key(config_api_key, |name| std::env::var(name).ok())
}

/// Resolves a base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error if the chosen URL is malformed.
pub fn resolve_base_url(config_base_url: Option<&str>, default_url: &str) -> Result<String> {
    let from_env = std::env::var(BASE_URL_ENV_VAR).ok();
    let chosen = from_env
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .or_else(|| config_base_url.map(str::trim).filter(|url| !url.is_empty()));

    match chosen {
        Some(url) => {
            url::Url::parse(url).with_context(|| format!("Invalid wisdom base URL: {url}"))?;
            Ok(url.trim_end_matches('/').to_string())
        }
        None => Ok(default_url.to_string()),
    }
}
