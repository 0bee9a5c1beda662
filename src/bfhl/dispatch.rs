//! Dispatcher — routes a validated request to the engine or the AI gateway
//! and wraps the result in a success envelope.
//!
//! Numeric work is CPU-bound and runs on the blocking pool so a large
//! `fibonacci` request does not stall other connections.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::envelope::{ResponseData, ResponseEnvelope};
use super::operation::BfhlRequest;
use super::validate::validate;
use crate::engine::{self, EngineError};
use crate::error::ApiError;
use crate::llm::AiGateway;

pub struct Dispatcher {
    official_email: String,
    ai: Arc<AiGateway>,
}

impl Dispatcher {
    pub fn new(official_email: impl Into<String>, ai: Arc<AiGateway>) -> Self {
        Self { official_email: official_email.into(), ai }
    }

    pub fn official_email(&self) -> &str {
        &self.official_email
    }

    /// Validate `body`, run the selected operation, and build the envelope.
    pub async fn handle(&self, body: &Value) -> Result<ResponseEnvelope, ApiError> {
        let request = validate(body)?;
        let data = self.dispatch(request).await?;
        Ok(ResponseEnvelope::success(self.official_email.as_str(), data))
    }

    pub async fn dispatch(&self, request: BfhlRequest) -> Result<ResponseData, ApiError> {
        let operation = request.operation();
        debug!(%operation, "dispatching");

        match request {
            BfhlRequest::Fibonacci(n) => {
                blocking(move || engine::fibonacci(n).map(ResponseData::Sequence)).await
            }
            BfhlRequest::Prime(values) => {
                blocking(move || engine::prime_filter(&values).map(ResponseData::Sequence)).await
            }
            BfhlRequest::Lcm(values) => {
                blocking(move || engine::lcm_of(&values).map(ResponseData::Integer)).await
            }
            BfhlRequest::Hcf(values) => {
                blocking(move || engine::hcf_of(&values).map(ResponseData::Integer)).await
            }
            BfhlRequest::Ai(question) => match self.ai.ask_single_word(&question).await {
                Ok(word) => Ok(ResponseData::Word(word)),
                Err(e) => {
                    warn!(error = %e, "AI request failed");
                    Err(e.into())
                }
            },
        }
    }
}

async fn blocking<F>(compute: F) -> Result<ResponseData, ApiError>
where
    F: FnOnce() -> Result<ResponseData, EngineError> + Send + 'static,
{
    tokio::task::spawn_blocking(compute)
        .await
        .map_err(|e| ApiError::Internal(format!("engine task failed: {e}")))?
        .map_err(ApiError::from)
}
