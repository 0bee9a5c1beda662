//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory, called by the gateway on first use.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod gemini;

use crate::config::AiConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `GEMINI_API_KEY` / `GOOGLE_API_KEY` (never TOML).
/// The dummy provider is keyless; Gemini refuses to build without a key.
pub fn build(config: &AiConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "gemini" => {
            let api_key = api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or(ProviderError::NotConfigured)?;
            let p = gemini::GeminiProvider::new(
                config.api_base_url.clone(),
                config.timeout_seconds,
                api_key,
            )?;
            Ok(LlmProvider::Gemini(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ai_config(provider: &str) -> AiConfig {
        AiConfig {
            provider: provider.into(),
            ..AiConfig::test_default()
        }
    }

    #[test]
    fn dummy_needs_no_key() {
        assert!(matches!(build(&ai_config("dummy"), None), Ok(LlmProvider::Dummy(_))));
    }

    #[test]
    fn gemini_without_key_is_not_configured() {
        assert!(matches!(build(&ai_config("gemini"), None), Err(ProviderError::NotConfigured)));
        assert!(matches!(
            build(&ai_config("gemini"), Some("  ".into())),
            Err(ProviderError::NotConfigured)
        ));
    }

    #[test]
    fn gemini_with_key_builds() {
        assert!(matches!(
            build(&ai_config("gemini"), Some("k".into())),
            Ok(LlmProvider::Gemini(_))
        ));
    }

    #[test]
    fn unknown_provider_errors() {
        let err = build(&ai_config("openai"), None).unwrap_err();
        assert!(err.to_string().contains("openai"));
    }
}
