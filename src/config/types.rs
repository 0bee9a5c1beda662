//! Resolved configuration types consumed by the rest of the crate.

/// HTTP listener and response settings (`[server]`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Echoed in every success envelope.
    pub official_email: String,
    pub log_level: String,
    /// Requests with larger bodies are refused with 413.
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// AI gateway settings (`[ai]`).
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// `"gemini"` or `"dummy"`.
    pub provider: String,
    /// API version root, without the `/models/...` suffix.
    pub api_base_url: String,
    /// Candidate models in fallback order.
    pub models: Vec<String>,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// Fully-resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ai: AiConfig,
    /// From `GEMINI_API_KEY` or `GOOGLE_API_KEY`. Never sourced from TOML.
    pub ai_api_key: Option<String>,
}

/// Environment-derived overrides, captured once so the loader itself never
/// reads the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `PORT`
    pub port: Option<String>,
    /// `OFFICIAL_EMAIL`
    pub official_email: Option<String>,
    /// `BFHL_LOG_LEVEL`
    pub log_level: Option<String>,
    /// `GEMINI_MODEL` — a single model, wins over everything else.
    pub gemini_model: Option<String>,
    /// `GEMINI_MODELS` — comma-separated list.
    pub gemini_models: Option<String>,
    /// `GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`.
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            port: var("PORT"),
            official_email: var("OFFICIAL_EMAIL"),
            log_level: var("BFHL_LOG_LEVEL"),
            gemini_model: var("GEMINI_MODEL"),
            gemini_models: var("GEMINI_MODELS"),
            api_key: var("GEMINI_API_KEY").or_else(|| var("GOOGLE_API_KEY")),
        }
    }
}
