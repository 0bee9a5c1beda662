//! LLM provider abstraction and the single-word AI gateway.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities. The `complete`
//! method is `async fn` on the enum so callers need no trait-object machinery.

pub mod gateway;
pub mod providers;

use thiserror::Error;

pub use gateway::{AiGateway, normalize_single_word};

/// Models tried, in order, when neither env nor TOML names any.
pub const DEFAULT_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash", "gemini-1.5-flash"];

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("AI service is not configured. Set GEMINI_API_KEY.")]
    NotConfigured,

    #[error("AI must be a non-empty string question.")]
    EmptyQuestion,

    #[error("provider request failed: {0}")]
    Request(String),

    /// `detail` carries the last model's error with a leading space, or is empty.
    #[error("AI request failed for models: {models}.{detail}")]
    AllModelsFailed { models: String, detail: String },

    #[error("AI service returned an empty answer.")]
    EmptyAnswer,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    Gemini(providers::gemini::GeminiProvider),
}

impl LlmProvider {
    /// Send `content` to `model` and return the raw reply text.
    pub async fn complete(&self, model: &str, content: &str) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(model, content).await,
            LlmProvider::Gemini(p) => p.complete(model, content).await,
        }
    }
}
