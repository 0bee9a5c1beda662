//! Dummy LLM provider — echoes input back prefixed with `[echo]`.
//! Lets the `AI` path run end to end without a credential.

use tracing::debug;

use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, model: &str, content: &str) -> Result<String, ProviderError> {
        debug!(%model, content_len = content.len(), "dummy provider echo");
        Ok(format!("[echo] {content}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn complete_prefixes_echo() {
        let p = DummyProvider;
        assert_eq!(p.complete("any", "hello").await.unwrap(), "[echo] hello");
    }

    #[tokio::test]
    async fn complete_empty_input() {
        let p = DummyProvider;
        assert_eq!(p.complete("any", "").await.unwrap(), "[echo] ");
    }
}
