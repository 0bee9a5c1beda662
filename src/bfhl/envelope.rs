use serde::Serialize;

use crate::engine::SerializableInteger;

/// Payload of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Sequence(Vec<SerializableInteger>),
    Integer(SerializableInteger),
    Word(String),
}

/// Wire body for every JSON response. `data` and `error` are mutually
/// exclusive and follow `is_success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(official_email: impl Into<String>, data: ResponseData) -> Self {
        Self {
            is_success: true,
            official_email: Some(official_email.into()),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: None,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Body of `GET /health`: success without `data`.
    pub fn health(official_email: impl Into<String>) -> Self {
        Self {
            is_success: true,
            official_email: Some(official_email.into()),
            data: None,
            error: None,
        }
    }
}
