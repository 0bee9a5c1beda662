//! Request validation — body shape, single recognised key, value schema.
//!
//! Checks run in a fixed order and the first failure is the one reported:
//! body shape, key count, key name, then the value schema (type, integrality,
//! lower bound, upper bound; arrays check emptiness before elements).

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive};
use serde_json::Value;

use super::operation::{BfhlRequest, Operation};
use crate::engine::FIBONACCI_MAX;
use crate::error::ApiError;

/// Maximum trimmed length of an `AI` question, in characters.
pub const AI_QUESTION_MAX_CHARS: usize = 2000;

pub fn validate(body: &Value) -> Result<BfhlRequest, ApiError> {
    let Value::Object(map) = body else {
        return Err(ApiError::Shape("Request body must be a JSON object.".into()));
    };

    let mut entries = map.iter();
    let (key, value) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => return Err(ApiError::Shape("Request body must contain exactly one key.".into())),
    };

    let operation = Operation::from_key(key).ok_or_else(|| ApiError::UnknownKey {
        key: key.clone(),
        allowed: Operation::allowed_keys(),
    })?;

    match operation {
        Operation::Fibonacci => fibonacci_count(value).map(BfhlRequest::Fibonacci),
        Operation::Prime => integer_list(operation, value).map(BfhlRequest::Prime),
        Operation::Lcm => integer_list(operation, value).map(BfhlRequest::Lcm),
        Operation::Hcf => integer_list(operation, value).map(BfhlRequest::Hcf),
        Operation::Ai => question(value).map(BfhlRequest::Ai),
    }
}

fn invalid(message: String) -> ApiError {
    ApiError::Validation(message)
}

fn fibonacci_count(value: &Value) -> Result<u32, ApiError> {
    let field = Operation::Fibonacci.key();
    let n = integer(value).map_err(|kind| invalid(format!("{field} must be {kind}.")))?;

    if n.is_negative() {
        return Err(invalid(format!("{field} must be greater than or equal to 0.")));
    }
    n.to_u32()
        .filter(|n| *n <= FIBONACCI_MAX)
        .ok_or_else(|| invalid(format!("{field} must be less than or equal to {FIBONACCI_MAX}.")))
}

fn integer_list(operation: Operation, value: &Value) -> Result<Vec<BigInt>, ApiError> {
    let field = operation.key();
    let items = match value {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(invalid(format!("{field} must be a non-empty array of integers."))),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            integer(item).map_err(|_| {
                invalid(format!("{field} must contain only finite integers (index {i})."))
            })
        })
        .collect()
}

fn question(value: &Value) -> Result<String, ApiError> {
    let field = Operation::Ai.key();
    let Value::String(raw) = value else {
        return Err(invalid(format!("{field} must be a string.")));
    };

    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if chars == 0 {
        return Err(invalid(format!("{field} must not be empty.")));
    }
    if chars > AI_QUESTION_MAX_CHARS {
        return Err(invalid(format!(
            "{field} must be at most {AI_QUESTION_MAX_CHARS} characters."
        )));
    }
    Ok(trimmed.to_string())
}

/// A JSON number with no fractional part, at full precision.
///
/// Integer literals keep every digit serde_json gives us as `i64`/`u64`.
/// Larger literals arrive as doubles; those are accepted when they are whole.
fn integer(value: &Value) -> Result<BigInt, &'static str> {
    let Value::Number(n) = value else {
        return Err("an integer");
    };
    if let Some(i) = n.as_i64() {
        return Ok(BigInt::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(BigInt::from(u));
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .and_then(BigInt::from_f64)
        .ok_or("an integer")
}
