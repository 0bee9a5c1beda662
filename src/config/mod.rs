//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the file given with `-f`), then applies environment overrides.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `ServerConfig`,
//!   `AiConfig`, `EnvOverrides`).
//! - **raw** — Raw TOML deserialization types; mirror the file shape and use
//!   serde defaults. Kept private.
//! - **load** — `load`, `load_from`, override resolution.

mod load;
mod raw;
mod types;

pub use load::{load, load_from};
pub use types::*;

#[cfg(test)]
impl AiConfig {
    /// Keyless dummy provider, unroutable base URL.
    pub fn test_default() -> Self {
        Self {
            provider: "dummy".into(),
            api_base_url: "http://localhost:0/v1beta".into(),
            models: vec!["test-model".into()],
            timeout_seconds: 1,
        }
    }
}

#[cfg(test)]
impl Config {
    /// Safe `Config` for unit tests — dummy AI, no API keys, no external calls.
    pub fn test_default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                official_email: "test@example.com".into(),
                log_level: "info".into(),
                body_limit_bytes: raw::default_body_limit_bytes(),
            },
            ai: AiConfig::test_default(),
            ai_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[server]
host = "127.0.0.1"
port = 8081
official_email = "someone@chitkara.edu.in"
log_level = "debug"
body_limit_bytes = 1024

[ai]
provider = "dummy"
api_base_url = "http://localhost:9999/v1beta"
models = ["first", "second"]
timeout_seconds = 5
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn no_overrides() -> EnvOverrides {
        EnvOverrides::default()
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(FULL_TOML);
        let cfg = load_from(f.path(), &no_overrides()).unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8081");
        assert_eq!(cfg.server.official_email, "someone@chitkara.edu.in");
        assert_eq!(cfg.server.log_level, "debug");
        assert_eq!(cfg.server.body_limit_bytes, 1024);
        assert_eq!(cfg.ai.provider, "dummy");
        assert_eq!(cfg.ai.models, vec!["first", "second"]);
        assert_eq!(cfg.ai.timeout_seconds, 5);
        assert!(cfg.ai_api_key.is_none());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let f = write_toml("");
        let cfg = load_from(f.path(), &no_overrides()).unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.server.official_email, "your_chitkara_email@example.com");
        assert_eq!(cfg.server.body_limit_bytes, 32 * 1024);
        assert_eq!(cfg.ai.provider, "gemini");
        assert_eq!(cfg.ai.models, vec!["gemini-2.5-flash", "gemini-2.0-flash", "gemini-1.5-flash"]);
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(std::path::Path::new("/nonexistent/config.toml"), &no_overrides());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
        assert!(msg.contains("cannot read"));
    }

    #[test]
    fn malformed_toml_errors() {
        let f = write_toml("[server\nport = ");
        let msg = load_from(f.path(), &no_overrides()).unwrap_err().to_string();
        assert!(msg.contains("parse error"));
    }

    #[test]
    fn env_overrides_win() {
        let f = write_toml(FULL_TOML);
        let overrides = EnvOverrides {
            port: Some("4000".into()),
            official_email: Some("override@chitkara.edu.in".into()),
            log_level: Some("warn".into()),
            api_key: Some("secret".into()),
            ..EnvOverrides::default()
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.official_email, "override@chitkara.edu.in");
        assert_eq!(cfg.server.log_level, "warn");
        assert_eq!(cfg.ai_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn invalid_port_override_errors() {
        let f = write_toml("");
        let overrides = EnvOverrides { port: Some("eighty".into()), ..EnvOverrides::default() };
        let msg = load_from(f.path(), &overrides).unwrap_err().to_string();
        assert!(msg.contains("invalid PORT"));
    }

    #[test]
    fn invalid_log_level_errors() {
        let f = write_toml("[server]\nlog_level = \"chatty\"\n");
        assert!(load_from(f.path(), &no_overrides()).is_err());
    }

    #[test]
    fn zero_body_limit_errors() {
        let f = write_toml("[server]\nbody_limit_bytes = 0\n");
        assert!(load_from(f.path(), &no_overrides()).is_err());
    }

    #[test]
    fn single_model_beats_model_list() {
        let f = write_toml(FULL_TOML);
        let overrides = EnvOverrides {
            gemini_model: Some(" only-this ".into()),
            gemini_models: Some("a,b".into()),
            ..EnvOverrides::default()
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.ai.models, vec!["only-this"]);
    }

    #[test]
    fn model_list_is_trimmed_and_compacted() {
        let f = write_toml(FULL_TOML);
        let overrides = EnvOverrides {
            gemini_models: Some(" a , ,b,".into()),
            ..EnvOverrides::default()
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.ai.models, vec!["a", "b"]);
    }

    #[test]
    fn blank_model_env_falls_through_to_file() {
        let f = write_toml(FULL_TOML);
        let overrides = EnvOverrides {
            gemini_model: Some("  ".into()),
            gemini_models: Some(" , ".into()),
            ..EnvOverrides::default()
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.ai.models, vec!["first", "second"]);
    }
}
