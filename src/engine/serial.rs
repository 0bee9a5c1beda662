//! Safe-integer-or-string serialization.

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};

/// Largest magnitude a JSON consumer using IEEE doubles can hold exactly
/// (`Number.MAX_SAFE_INTEGER`, 2^53 − 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// An integer result as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializableInteger {
    /// `|value| <= MAX_SAFE_INTEGER`, emitted as a JSON number.
    Number(i64),
    /// Anything larger, emitted as its exact decimal string.
    BigDecimalString(String),
}

impl SerializableInteger {
    pub fn from_bigint(value: &BigInt) -> Self {
        if fits_safe(value.magnitude()) {
            // In range, so the conversion cannot fail.
            if let Some(n) = value.to_i64() {
                return SerializableInteger::Number(n);
            }
        }
        SerializableInteger::BigDecimalString(value.to_string())
    }

    pub fn from_biguint(value: &BigUint) -> Self {
        Self::from_bigint(&BigInt::from_biguint(Sign::Plus, value.clone()))
    }

    /// Recover the exact mathematical value.
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self {
            SerializableInteger::Number(n) => Some(BigInt::from(*n)),
            SerializableInteger::BigDecimalString(s) => s.parse().ok(),
        }
    }
}

fn fits_safe(magnitude: &BigUint) -> bool {
    magnitude.to_u64().is_some_and(|m| m <= MAX_SAFE_INTEGER)
}

impl From<i64> for SerializableInteger {
    fn from(value: i64) -> Self {
        Self::from_bigint(&BigInt::from(value))
    }
}

impl fmt::Display for SerializableInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializableInteger::Number(n) => write!(f, "{n}"),
            SerializableInteger::BigDecimalString(s) => f.write_str(s),
        }
    }
}

impl Serialize for SerializableInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SerializableInteger::Number(n) => serializer.serialize_i64(*n),
            SerializableInteger::BigDecimalString(s) => serializer.serialize_str(s),
        }
    }
}
