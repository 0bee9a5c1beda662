//! Application-wide error types.
//!
//! [`AppError`] covers startup and server-loop failures; [`ApiError`] is the
//! per-request taxonomy that the HTTP layer turns into a response envelope.

use axum::http::StatusCode;
use thiserror::Error;

use crate::engine::EngineError;
use crate::llm::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level failures. The `Display` text is what the client sees.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not a single-key JSON object.
    #[error("{0}")]
    Shape(String),

    /// The sole key is outside the recognised operation set.
    #[error("Invalid key. Allowed keys: {allowed}.")]
    UnknownKey { key: String, allowed: String },

    /// The value under a known key violates its schema.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON payload.")]
    InvalidJson,

    #[error("AI service failed: {0}")]
    AiService(String),

    /// Detail is logged, never serialised.
    #[error("Internal server error.")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Shape(_)
            | ApiError::UnknownKey { .. }
            | ApiError::Validation(_)
            | ApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ApiError::AiService(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Engine errors past validation mean the validator and engine disagree.
impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        ApiError::AiService(e.to_string())
    }
}
