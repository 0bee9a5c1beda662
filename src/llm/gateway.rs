//! Single-word question answering on top of an [`LlmProvider`].
//!
//! The provider is built on first use and cached for the life of the process.
//! A failed build (e.g. no credential yet) is not cached, so the next request
//! tries again.

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::AiConfig;
use crate::llm::{DEFAULT_MODELS, LlmProvider, ProviderError, providers};

const PROMPT_PREFIX: &str = "Answer in exactly one word with no punctuation. Question: ";

pub struct AiGateway {
    config: AiConfig,
    api_key: Option<String>,
    provider: OnceCell<LlmProvider>,
}

impl AiGateway {
    /// `api_key` comes from `GEMINI_API_KEY` / `GOOGLE_API_KEY`, never TOML.
    pub fn new(config: AiConfig, api_key: Option<String>) -> Self {
        Self { config, api_key, provider: OnceCell::new() }
    }

    /// Concurrent first callers wait on the same initialisation.
    async fn provider(&self) -> Result<&LlmProvider, ProviderError> {
        self.provider
            .get_or_try_init(|| async {
                let provider = providers::build(&self.config, self.api_key.clone())?;
                info!(provider = %self.config.provider, "AI provider initialised");
                Ok::<_, ProviderError>(provider)
            })
            .await
    }

    /// Candidate models in the order they are tried.
    pub fn models(&self) -> Vec<String> {
        if self.config.models.is_empty() {
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
        } else {
            self.config.models.clone()
        }
    }

    /// Ask `question` and reduce the reply to one word.
    ///
    /// Models are tried in order and the first successful reply wins. If every
    /// model errors, the failure names all of them plus the last error.
    pub async fn ask_single_word(&self, question: &str) -> Result<String, ProviderError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ProviderError::EmptyQuestion);
        }

        let provider = self.provider().await?;
        let prompt = format!("{PROMPT_PREFIX}{question}");
        let models = self.models();

        let mut last_error = None;
        let mut reply = None;
        for model in &models {
            match provider.complete(model, &prompt).await {
                Ok(text) => {
                    debug!(%model, "AI model answered");
                    reply = Some(text);
                    break;
                }
                Err(e) => {
                    warn!(%model, error = %e, "AI model failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        let Some(raw) = reply else {
            let detail = last_error.map(|e| format!(" {e}")).unwrap_or_default();
            return Err(ProviderError::AllModelsFailed { models: models.join(","), detail });
        };

        normalize_single_word(&raw).ok_or(ProviderError::EmptyAnswer)
    }
}

/// First whitespace-separated token of `raw`, keeping only letters, digits,
/// `_` and `-`. `None` when nothing survives.
pub fn normalize_single_word(raw: &str) -> Option<String> {
    let word: String = raw
        .split_whitespace()
        .next()?
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    (!word.is_empty()).then_some(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(provider: &str, api_key: Option<&str>) -> AiGateway {
        let config = AiConfig { provider: provider.into(), ..AiConfig::test_default() };
        AiGateway::new(config, api_key.map(String::from))
    }

    #[test]
    fn normalize_takes_first_token() {
        assert_eq!(normalize_single_word("  Paris is the capital"), Some("Paris".into()));
        assert_eq!(normalize_single_word("Paris."), Some("Paris".into()));
        assert_eq!(normalize_single_word("\"Mumbai\"\n"), Some("Mumbai".into()));
        assert_eq!(normalize_single_word("well-known_word!"), Some("well-known_word".into()));
        assert_eq!(normalize_single_word("Zürich"), Some("Zürich".into()));
        assert_eq!(normalize_single_word("42"), Some("42".into()));
    }

    #[test]
    fn normalize_rejects_empty() {
        assert_eq!(normalize_single_word(""), None);
        assert_eq!(normalize_single_word("   \n"), None);
        assert_eq!(normalize_single_word("... words"), None);
    }

    #[test]
    fn models_fall_back_to_defaults() {
        let mut config = AiConfig::test_default();
        config.models.clear();
        let g = AiGateway::new(config, None);
        assert_eq!(g.models(), DEFAULT_MODELS.iter().map(|m| m.to_string()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn dummy_answers_with_one_word() {
        let g = gateway("dummy", None);
        assert_eq!(g.ask_single_word("What is the capital of France?").await.unwrap(), "echo");
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let g = gateway("dummy", None);
        let err = g.ask_single_word("   ").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyQuestion));
    }

    #[tokio::test]
    async fn missing_credential_is_reported_and_not_cached() {
        let g = gateway("gemini", None);
        for _ in 0..2 {
            let err = g.ask_single_word("anything").await.unwrap_err();
            assert_eq!(err.to_string(), "AI service is not configured. Set GEMINI_API_KEY.");
        }
        assert!(g.provider.get().is_none());
    }

    #[tokio::test]
    async fn provider_is_built_once() {
        let g = gateway("dummy", None);
        let first = g.provider().await.unwrap() as *const LlmProvider;
        let second = g.provider().await.unwrap() as *const LlmProvider;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unreachable_models_are_aggregated() {
        let config = AiConfig {
            provider: "gemini".into(),
            // Port 9 (discard) on loopback: connection refused, fast.
            api_base_url: "http://127.0.0.1:9/v1beta".into(),
            models: vec!["m-one".into(), "m-two".into()],
            timeout_seconds: 2,
        };
        let g = AiGateway::new(config, Some("key".into()));
        let err = g.ask_single_word("capital of Peru?").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("AI request failed for models: m-one,m-two."), "{msg}");
    }
}
