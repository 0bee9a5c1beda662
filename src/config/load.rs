//! Configuration loading with env-var overrides.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::AppError;
use crate::logger;

use super::raw::{self, RawConfig};
use super::types::*;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Load config from the given path, or `config/default.toml`, then apply
/// env-var overrides. With no path and no default file, built-in defaults
/// are used.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = EnvOverrides::from_env();

    if let Some(path) = config_path {
        return load_from(Path::new(path), &overrides);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        debug!("no {DEFAULT_CONFIG_PATH}, using built-in defaults");
        resolve(RawConfig::default(), overrides)
    }
}

/// Internal loader — accepts an explicit path and overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: &Path, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&text)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    resolve(parsed, overrides.clone())
}

/// Merge raw file values with overrides into the public `Config`.
pub(super) fn resolve(raw: RawConfig, overrides: EnvOverrides) -> Result<Config, AppError> {
    let s = raw.server;

    let port = match overrides.port.as_deref() {
        Some(p) => p
            .trim()
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("invalid PORT '{p}': {e}")))?,
        None => s.port,
    };

    let log_level = overrides.log_level.unwrap_or(s.log_level);
    logger::parse_level(&log_level).map_err(|e| AppError::Config(e.to_string()))?;

    if s.body_limit_bytes == 0 {
        return Err(AppError::Config("server.body_limit_bytes must be greater than 0".into()));
    }

    let models = resolve_models(
        overrides.gemini_model.as_deref(),
        overrides.gemini_models.as_deref(),
        raw.ai.models,
    );

    Ok(Config {
        server: ServerConfig {
            host: s.host,
            port,
            official_email: overrides.official_email.unwrap_or(s.official_email),
            log_level,
            body_limit_bytes: s.body_limit_bytes,
        },
        ai: AiConfig {
            provider: raw.ai.provider,
            api_base_url: raw.ai.api_base_url,
            models,
            timeout_seconds: raw.ai.timeout_seconds,
        },
        ai_api_key: overrides.api_key,
    })
}

/// `GEMINI_MODEL` > `GEMINI_MODELS` > `[ai] models` > built-in list.
fn resolve_models(single: Option<&str>, list: Option<&str>, from_file: Vec<String>) -> Vec<String> {
    if let Some(model) = single.map(str::trim).filter(|m| !m.is_empty()) {
        return vec![model.to_string()];
    }

    let from_env = list.map(split_models).unwrap_or_default();
    if !from_env.is_empty() {
        return from_env;
    }

    let from_file: Vec<String> = from_file
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();
    if !from_file.is_empty() {
        return from_file;
    }

    raw::default_ai_models()
}

fn split_models(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}
