//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

use crate::llm::DEFAULT_MODELS;

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub ai: RawAi,
}

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_official_email")]
    pub official_email: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            official_email: default_official_email(),
            log_level: default_log_level(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawAi {
    #[serde(default = "default_ai_provider")]
    pub provider: String,
    #[serde(default = "default_ai_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default = "default_ai_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawAi {
    fn default() -> Self {
        Self {
            provider: default_ai_provider(),
            api_base_url: default_ai_api_base_url(),
            models: Vec::new(),
            timeout_seconds: default_ai_timeout_seconds(),
        }
    }
}

pub(super) fn default_host() -> String { "0.0.0.0".to_string() }
pub(super) fn default_port() -> u16 { 3000 }
pub(super) fn default_official_email() -> String { "your_chitkara_email@example.com".to_string() }
pub(super) fn default_log_level() -> String { "info".to_string() }
pub(super) fn default_body_limit_bytes() -> usize { 32 * 1024 }
pub(super) fn default_ai_provider() -> String { "gemini".to_string() }
pub(super) fn default_ai_api_base_url() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
pub(super) fn default_ai_timeout_seconds() -> u64 { 30 }

pub(super) fn default_ai_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}
